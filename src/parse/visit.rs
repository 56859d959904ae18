use crate::common::*;
use crate::parse::ast;

pub trait AstVisitor {
    type Output;

    fn visit<T: ?Sized>(&mut self, node: &T) -> Self::Output
    where
        T: Accept<Self>,
    {
        node.accept(self)
    }

    fn visit_int(&mut self, x: &Int) -> Self::Output;

    fn visit_dice(&mut self, dice: &ast::DiceTerm) -> Self::Output;

    fn visit_signed(&mut self, sign: &Sign, inner: &ast::Node) -> Self::Output;

    fn visit_sum(&mut self, l: &ast::Node, op: &Sign, r: &ast::Node) -> Self::Output;
}

pub trait Accept<V: AstVisitor + ?Sized> {
    fn accept(&self, v: &mut V) -> V::Output;
}

impl<V: AstVisitor + ?Sized> Accept<V> for ast::Node {
    fn accept(&self, v: &mut V) -> V::Output {
        match self {
            Self::Literal(x) => v.visit_int(x),
            Self::Dice(x) => v.visit_dice(x),
            Self::Signed(sign, x) => v.visit_signed(sign, x),
            Self::Sum(l, op, r) => v.visit_sum(l, op, r),
        }
    }
}
