use clap::{Parser, ValueEnum};
use env_logger::Env;
use gdice::{
    parse, DiceError, Int, MarkdownStringifier, RollConfig, RollContext, RollSheet, Stringify,
    DEFAULT_MAX_ROLLS,
};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// Roll dice expressions such as `3d6+2d4<1-5`.
///
/// `NdS` rolls N dice with S sides (N defaults to 1), `<K` ignores the K
/// lowest rolls of a group and `>K` the K highest (K defaults to 1). Terms
/// are added or subtracted with `+` and `-`.
///
/// Without expressions, reads one expression per line from standard input.
#[derive(Parser)]
#[command(name = "gdice", version)]
struct Cli {
    /// Show every rolled value, not just the total
    #[arg(short, long, env = "GDICE_VERBOSE")]
    verbose: bool,

    /// Show rolls as Markdown, ignored dice struck through
    #[arg(long, conflicts_with_all = ["dice", "modifier"])]
    markdown: bool,

    /// Extra dice group `SIDESxROLLS` added to every roll; negative ROLLS subtract
    #[arg(short, long = "dice", value_name = "SIDESxROLLS", value_parser = parse_group)]
    dice: Vec<(Int, Int)>,

    /// Constant added to every roll
    #[arg(short, long, allow_hyphen_values = true)]
    modifier: Option<Int>,

    /// Most dice a single roll may use
    #[arg(long, env = "GDICE_MAX_ROLLS", default_value_t = DEFAULT_MAX_ROLLS)]
    max_rolls: usize,

    /// Seed for reproducible rolls
    #[arg(long, env = "GDICE_SEED")]
    seed: Option<u64>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Dice expressions to roll; put `--` before one that starts with `-`
    expressions: Vec<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

fn parse_group(s: &str) -> Result<(Int, Int), String> {
    let (sides, rolls) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected SIDESxROLLS, found {:?}", s))?;
    let sides = sides
        .trim()
        .parse()
        .map_err(|e| format!("invalid sides {:?}: {}", sides, e))?;
    let rolls = rolls
        .trim()
        .parse()
        .map_err(|e| format!("invalid rolls {:?}: {}", rolls, e))?;
    Ok((sides, rolls))
}

struct App {
    cli: Cli,
    config: RollConfig,
    rng: StdRng,
}

impl App {
    fn new(cli: Cli) -> Self {
        let rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let config = RollConfig::new(cli.max_rolls);
        Self { cli, config, rng }
    }

    fn sheet(&self, expr: Option<&str>) -> RollSheet {
        let mut sheet = RollSheet::new();
        if let Some(expr) = expr {
            sheet = sheet.expression(expr);
        }
        for &(sides, rolls) in &self.cli.dice {
            sheet = sheet.group(sides, rolls);
        }
        if let Some(modifier) = self.cli.modifier {
            sheet = sheet.modifier(modifier);
        }
        sheet
    }

    /// The text to print for one roll, empty when there was nothing to roll.
    fn roll(&mut self, expr: Option<&str>) -> Result<String, DiceError> {
        if self.cli.markdown {
            let ast = parse::parse(expr.unwrap_or_default(), self.config.max_rolls)?;
            if ast.is_empty() {
                return Ok(String::new());
            }
            let roll = RollContext::new(&mut self.rng).eval(&ast)?;
            return Ok(if self.cli.verbose {
                format!("{}\n", MarkdownStringifier::new().str_result(&roll))
            } else {
                format!("`{}`\n", roll.total())
            });
        }

        let outcome = self.sheet(expr).roll(&mut self.rng, &self.config)?;
        Ok(outcome.map_or_else(String::new, |o| o.display(self.cli.verbose)))
    }

    fn run_args(&mut self) -> ExitCode {
        let expressions = std::mem::take(&mut self.cli.expressions);
        let mut status = ExitCode::SUCCESS;
        if expressions.is_empty() {
            self.print(None, &mut status);
        }
        for expr in &expressions {
            self.print(Some(expr), &mut status);
        }
        status
    }

    fn print(&mut self, expr: Option<&str>, status: &mut ExitCode) {
        match self.roll(expr) {
            Ok(s) => print!("{}", s),
            Err(why) => {
                log::info!("{:?} failed: {:?}", expr, why);
                eprintln!("Error: {}", why);
                *status = ExitCode::FAILURE;
            }
        }
    }

    /// Rolls one raw input line, which need not be valid UTF-8.
    fn roll_line(&mut self, line: &[u8]) -> Result<String, DiceError> {
        let line = line.trim_ascii();
        parse::parse_bytes(line, self.config.max_rolls)?;
        let expr = String::from_utf8_lossy(line);
        self.roll(Some(&expr))
    }

    fn roll_lines<B: BufRead>(
        &mut self,
        input: B,
        mut on_result: impl FnMut(Result<String, DiceError>) -> io::Result<()>,
    ) -> io::Result<()> {
        for line in input.split(b'\n') {
            let result = self.roll_line(&line?);
            on_result(result)?;
        }
        Ok(())
    }

    fn repl(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        print!("> ");
        io::stdout().flush()?;
        self.roll_lines(stdin.lock(), |result| {
            match result {
                Ok(r) => print!("{}", r),
                Err(why) => eprintln!("Error: {}", why),
            }
            print!("> ");
            io::stdout().flush()
        })?;
        println!();
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    let interactive = cli.expressions.is_empty() && cli.dice.is_empty() && cli.modifier.is_none();
    let mut app = App::new(cli);
    if interactive {
        match app.repl() {
            Ok(()) => ExitCode::SUCCESS,
            Err(why) => {
                eprintln!("Error: {}", why);
                ExitCode::FAILURE
            }
        }
    } else {
        app.run_args()
    }
}
