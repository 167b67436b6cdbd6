use clap::{Parser, Subcommand};
use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::PathBuf;
use terraform_ioc_normalizer::config::Config;
use terraform_ioc_normalizer::output::{self, SystemClipboard};
use terraform_ioc_normalizer::{NormalizerError, Session};

#[derive(Parser)]
#[command(name = "terraform-ioc-normalizer")]
#[command(about = "Turn IPv4 IoC dumps into Terraform /32 CIDR lists.")]
struct CommandLine {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the valid IPv4 addresses found in a file
    #[command(alias = "l")]
    Load { file: PathBuf },
    /// Convert to /32 blocks and print the Terraform list
    #[command(alias = "p")]
    Process {
        file: PathBuf,
        /// Print one `cidr_blocks = [..]` line per address instead
        #[arg(short, long)]
        rules: bool,
    },
    /// Write JSON and TXT exports
    #[command(alias = "e")]
    Export {
        file: PathBuf,
        /// Defaults to TF_IOC_OUTPUT_DIR or ./output
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Also copy the Terraform list to the clipboard
        #[arg(short, long)]
        clipboard: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging()?;
    log::info!("#Start main()");

    let cli = CommandLine::parse();
    let mut cfg = Config::from_env();
    if let Commands::Export {
        output_dir: Some(dir),
        ..
    } = &cli.command
    {
        cfg.output_dir = dir.clone();
    }
    cfg.ensure_dirs()?;

    let mut session = Session::new();
    match run(cli.command, &cfg, &mut session) {
        Ok(()) => {}
        Err(e) if !e.is_fatal() => {
            log::info!("{e}");
            println!("{} {e}", "INFO".on_blue());
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{} {e}", "ERROR".on_red());
            std::process::exit(1);
        }
    }
    output::print_summary(&session.summary());
    Ok(())
}

fn run(command: Commands, cfg: &Config, session: &mut Session) -> Result<(), NormalizerError> {
    match command {
        Commands::Load { file } => {
            session.load(&file)?;
            output::print_list("Raw IPv4 (Valid)", &session.raw_addresses());
        }
        Commands::Process { file, rules } => {
            session.load(&file)?;
            session.process()?;
            if rules {
                print!("{}", output::render_rules(session.records()));
            } else {
                output::print_list("Terraform CIDR /32", &session.cidr_blocks());
                println!("{}", output::to_clipboard_text(session.records()));
            }
        }
        Commands::Export {
            file, clipboard, ..
        } => {
            session.load(&file)?;
            session.process()?;
            let report = session.export(&cfg.output_dir)?;
            for path in &report.paths {
                println!("Saved: {}", path.display().to_string().green());
            }
            if clipboard {
                let mut sink = SystemClipboard::new(cfg.clipboard_cmd.as_deref());
                match session.copy_to(&mut sink) {
                    Ok(_) => println!("Copied {} CIDR to clipboard", report.snapshot.ipv4_count),
                    Err(e) => eprintln!("{} {e}", "WARN".on_yellow()),
                }
            }
        }
    }
    Ok(())
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    if std::path::Path::new("log4rs.yml").exists() {
        log4rs::init_file("log4rs.yml", Default::default())?;
        return Ok(());
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}")))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}
