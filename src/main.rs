use clap::{Args, Parser as ClapParser, Subcommand};
use flyql::cli::{self, CheckResult, CliError, CliOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "flyql")]
#[command(about = "FlyQL - parse and inspect compact boolean filter queries")]
#[command(version)]
struct Cli {
    /// Log parser transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct QueryArgs {
    /// The FlyQL query (reads from stdin if not provided)
    query: Option<String>,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,

    /// Print failures as diagnostics instead of exiting with an error
    #[arg(long)]
    no_raise: bool,

    /// Treat the query as partial input and skip end-of-input checks
    #[arg(long)]
    partial: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and print its tree as JSON
    Parse(QueryArgs),

    /// Only validate syntax
    Check(QueryArgs),

    /// Print semantic highlighting tokens as JSON
    Tokens(QueryArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "flyql=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse(args) => run_parse(args),
        Commands::Check(args) => run_check(args),
        Commands::Tokens(args) => run_tokens(args),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_options(args: QueryArgs) -> Result<CliOptions, CliError> {
    let query = match args.query {
        Some(q) => q,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            // Keep inner newlines, drop the one the shell appends
            buffer.strip_suffix('\n').unwrap_or(&buffer).to_string()
        }
        None => return Err(CliError::NoInput),
    };

    Ok(CliOptions {
        query,
        pretty: args.pretty,
        no_raise: args.no_raise,
        partial: args.partial,
    })
}

fn run_parse(args: QueryArgs) -> Result<(), CliError> {
    let options = read_options(args)?;
    let output = cli::execute_parse(&options)?;
    println!("{}", output.json);
    if output.failed {
        std::process::exit(1);
    }
    Ok(())
}

fn run_check(args: QueryArgs) -> Result<(), CliError> {
    let options = read_options(args)?;
    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
    }
    Ok(())
}

fn run_tokens(args: QueryArgs) -> Result<(), CliError> {
    let options = read_options(args)?;
    println!("{}", cli::execute_tokens(&options)?);
    Ok(())
}
