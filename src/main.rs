use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use login_oracle::clock::{Clock, SimulatedClock, SystemClock};
use login_oracle::config::{self, Config};
use login_oracle::driver::{MockLoginPage, MockPageConfig};
use login_oracle::harness::{RunnerConfig, ScenarioRunner, filter_scenarios, login_suite};
use login_oracle::oracle::{Credential, InteractionMode, ReferenceCredentials, predict};
use login_oracle::session::Session;

/// Login Oracle - executable expectations for a web login screen
#[derive(Parser, Debug)]
#[command(
    name = "login-oracle",
    about = "Classify login credentials and run login screen scenarios",
    after_help = "ENVIRONMENT VARIABLES:\n\
        LOGIN_ORACLE_BASE_URL            Login page URL\n\
        LOGIN_ORACLE_VALID_USERNAME      Canonical valid username\n\
        LOGIN_ORACLE_VALID_PASSWORD      Canonical valid password\n\
        LOGIN_ORACLE_LOCKED_USERNAME     Locked account username\n\
        LOGIN_ORACLE_DEGRADED_USERNAME   Slow account username\n\
        LOGIN_ORACLE_IDLE_MS             Idle threshold for the session check (ms)\n\
        LOGIN_ORACLE_REPORT_DIR          Base directory for run reports\n\
        RUST_LOG                         Log filter (default: login_oracle=info)"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every scenario with its account class and expected outcome
    Scenarios {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a credential pair and print the expected outcome
    Classify {
        #[arg(short, long, default_value = "")]
        username: String,

        #[arg(short, long, default_value = "")]
        password: String,

        /// Submit with the Enter key instead of the button
        #[arg(long)]
        key_submit: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the scenarios against the simulated login page
    Run {
        /// Only run scenarios whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Idle period for the session check in milliseconds (default: configured threshold)
        #[arg(long)]
        idle_ms: Option<u64>,

        /// Block on the wall clock instead of virtual time
        #[arg(long)]
        real_time: bool,

        /// Expire simulated sessions after this many idle milliseconds
        #[arg(long)]
        session_ttl_ms: Option<u64>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,

        /// Directory for the report (kept)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep the report session directory
        #[arg(long, short = 'k')]
        keep: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "login_oracle=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = config::get().clone();

    match args.command {
        Some(Commands::Scenarios { json }) => {
            let reference = ReferenceCredentials::from(&cfg);
            let scenarios = login_suite(&reference, cfg.idle_threshold());

            if json {
                let rows: Vec<_> = scenarios
                    .iter()
                    .map(|s| {
                        let prediction = s
                            .classifies()
                            .then(|| predict(&reference, &s.credential, s.mode));
                        serde_json::json!({
                            "scenario": s,
                            "prediction": prediction,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (i, s) in scenarios.iter().enumerate() {
                    println!("{:>2}. {}", i + 1, s.name);
                    if s.classifies() {
                        let p = predict(&reference, &s.credential, s.mode);
                        println!("    class: {}  ({})  expect: {}", p.class, s.mode, p.outcome);
                    } else {
                        println!("    form contract");
                    }
                }
            }
        }

        Some(Commands::Classify {
            username,
            password,
            key_submit,
            json,
        }) => {
            let reference = ReferenceCredentials::from(&cfg);
            let mode = if key_submit {
                InteractionMode::KeySubmit
            } else {
                InteractionMode::ButtonClick
            };
            let prediction = predict(&reference, &Credential::new(username, password), mode);

            if json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                println!("Class: {}", prediction.class);
                println!("Expected: {}", prediction.outcome);
            }
        }

        Some(Commands::Run {
            filter,
            idle_ms,
            real_time,
            session_ttl_ms,
            json,
            output,
            keep,
        }) => {
            let success = run_suite(
                &cfg,
                RunOptions {
                    filter,
                    idle_ms,
                    real_time,
                    session_ttl_ms,
                    json,
                    output,
                    keep,
                },
            )?;
            if !success {
                std::process::exit(1);
            }
        }

        None => {
            println!("Login Oracle - executable expectations for a web login screen");
            println!();
            println!("Usage: login-oracle <COMMAND>");
            println!();
            println!("Commands:");
            println!("  scenarios  List scenarios with their class and expected outcome");
            println!("  classify   Classify a username/password pair");
            println!("  run        Run the scenarios against the simulated login page");
            println!();
            println!("Run with --help for more information.");
        }
    }

    Ok(())
}

struct RunOptions {
    filter: Option<String>,
    idle_ms: Option<u64>,
    real_time: bool,
    session_ttl_ms: Option<u64>,
    json: bool,
    output: Option<PathBuf>,
    keep: bool,
}

/// Run the suite and report; returns whether every scenario passed
fn run_suite(cfg: &Config, opts: RunOptions) -> Result<bool, Box<dyn Error>> {
    let reference = ReferenceCredentials::from(cfg);
    let idle = opts
        .idle_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| cfg.idle_threshold());

    let mut scenarios = login_suite(&reference, idle);
    if let Some(filter) = &opts.filter {
        scenarios = filter_scenarios(scenarios, filter);
    }
    if scenarios.is_empty() {
        return Err("No scenarios match the filter".into());
    }

    let clock: Arc<dyn Clock> = if opts.real_time {
        Arc::new(SystemClock::new())
    } else {
        Arc::new(SimulatedClock::new())
    };

    let mut page = MockPageConfig::new(&cfg.target.base_url).accounts(reference);
    if let Some(ttl) = opts.session_ttl_ms {
        page = page.session_ttl(Duration::from_millis(ttl));
    }
    let driver = MockLoginPage::with_clock(page, clock.clone());

    info!(count = scenarios.len(), target = %cfg.target.base_url, "starting suite");
    let mut runner = ScenarioRunner::new(driver, RunnerConfig::from(cfg), clock);
    let report = runner.run_suite(&scenarios);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Run completed: {} passed, {} failed", report.passed, report.failed);
        for s in &report.scenarios {
            let status = if s.passed { "ok  " } else { "FAIL" };
            println!("  [{}] {} ({} ms)", status, s.name, s.duration_ms);
            if let Some(err) = &s.error {
                println!("         {}", err);
            }
        }
    }

    if opts.output.is_some() || opts.keep {
        let session = match &opts.output {
            Some(dir) => Session::in_dir(dir),
            None => Session::with_name("login_suite").keep(true),
        };
        session.init()?;
        let path = session.write_report(&report)?;
        if !opts.json {
            println!("\nReport: {}", path.display());
        }
    }

    Ok(report.success())
}
