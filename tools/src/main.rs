//! decision-runner: headless driver for the financial decision engine.
//!
//! Usage:
//!   decision-runner --seed 12345 --data-dir ./data
//!   decision-runner --seed 12345 --ipc-mode

use anyhow::Result;
use finempower_core::{
    application::ApplicationStatus,
    command::SessionCommand,
    config::DecisionConfig,
    engine::DecisionEngine,
    event::DecisionEvent,
    lifecycle::ApplicationSession,
    notice::Notice,
    BusinessProfile, LoanRequest, LoanTerms,
};
use serde_json::json;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    let config = if Path::new(data_dir).is_dir() {
        DecisionConfig::load(data_dir)?
    } else {
        log::warn!("data dir {data_dir} not found, using built-in defaults");
        DecisionConfig::default()
    };

    let mut engine = DecisionEngine::new(config, seed)?;
    let mut session = engine.open_session();

    if ipc_mode {
        run_ipc_loop(&engine, &mut session)?;
    } else {
        println!("Decision engine demo");
        println!("  seed:      {seed}");
        println!("  data_dir:  {data_dir}");
        println!("  started:   {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
        println!();
        run_demo(&engine, &mut session)?;
    }

    session.close()?;
    Ok(())
}

fn run_demo(engine: &DecisionEngine, session: &mut ApplicationSession) -> Result<()> {
    let terms = LoanTerms::new(10_000.0, 7.25, 12);
    let schedule = engine.amortize(&terms)?;

    println!("=== LOAN CALCULATOR ===");
    println!(
        "  ${:.2} at {}% over {} months",
        terms.principal, terms.annual_rate_percent, terms.term_months
    );
    println!("  monthly payment: ${:.2}", schedule.periodic_payment);
    println!("  total payment:   ${:.2}", schedule.total_payment);
    println!("  total interest:  ${:.2}", schedule.total_interest);
    for row in &schedule.schedule {
        println!(
            "  {:>3} | principal ${:>9.2} | interest ${:>7.2} | balance ${:>10.2}",
            row.period, row.principal_portion, row.interest_portion, row.remaining_balance
        );
    }

    let profile = BusinessProfile::new(50_000.0, 2.0, 10_000.0);
    let eligibility = engine.evaluate(&profile)?;

    println!();
    println!("=== ELIGIBILITY ===");
    println!("  score:   {}", eligibility.score);
    println!("  rating:  {:?}", eligibility.rating);
    println!("  insight: {}", engine.scorer().insight_text(&eligibility));

    let request = LoanRequest {
        business_name:   "Demo Boutique".into(),
        annual_revenue:  profile.annual_revenue,
        loan_amount:     profile.requested_amount,
        purpose:         "Inventory expansion".into(),
        duration_months: 12,
    };
    let application = session.submit(request)?;
    print_notices(session.events());

    let delay = engine.config().lifecycle.resolution_delay_ms;
    let events = session.advance(delay)?;
    print_notices(&events);

    let status = session.current_status(&application.id)?;
    let guidance = status.guidance();

    println!();
    println!("=== APPLICATION ===");
    println!("  id:      {}", application.id);
    println!("  status:  {status}");
    println!("  {}", guidance.headline);
    println!("  {}", guidance.detail);

    if guidance.show_alternatives {
        println!();
        println!("=== ALTERNATIVE FINANCING ===");
        for source in engine.funding().alternatives() {
            println!(
                "  {} ({}) | {}% | ${:.0}-${:.0}",
                source.name,
                source.kind.label(),
                source.annual_rate_percent,
                source.min_amount,
                source.max_amount
            );
        }
    }
    Ok(())
}

fn print_notices(events: &[DecisionEvent]) {
    for notice in events.iter().filter_map(Notice::for_event) {
        println!("  [{:?}] {}: {}", notice.tone, notice.title, notice.description);
    }
}

fn run_ipc_loop(engine: &DecisionEngine, session: &mut ApplicationSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: SessionCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                writeln!(stdout, "{}", json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        if matches!(cmd, SessionCommand::Quit) {
            break;
        }

        // Engine errors are reported to the caller; the loop keeps going.
        let reply = match handle_command(engine, session, &cmd) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("command failed: {e}");
                json!({ "error": e.to_string() })
            }
        };
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn handle_command(
    engine: &DecisionEngine,
    session: &mut ApplicationSession,
    cmd: &SessionCommand,
) -> Result<serde_json::Value> {
    let reply = match cmd {
        SessionCommand::Amortize { principal, annual_rate_percent, term_months } => {
            let terms = LoanTerms::new(*principal, *annual_rate_percent, *term_months);
            serde_json::to_value(engine.amortize(&terms)?)?
        }
        SessionCommand::Score { annual_revenue, years_of_operation, requested_amount } => {
            let profile =
                BusinessProfile::new(*annual_revenue, *years_of_operation, *requested_amount);
            let result = engine.evaluate(&profile)?;
            json!({
                "result": result,
                "insight": engine.scorer().insight_text(&result),
            })
        }
        SessionCommand::Submit { request } => {
            let application = session.submit(request.clone())?;
            json!({
                "application": application,
                "guidance": application.status().guidance(),
                "notice": session.events().last().and_then(Notice::for_event),
            })
        }
        SessionCommand::Advance { ms } => {
            let events = session.advance(*ms)?;
            json!({
                "now": session.now(),
                "events": events,
                "notices": notices_for(&events),
            })
        }
        SessionCommand::Resolve { application_id } => {
            let status = session.resolve(application_id)?;
            status_reply(engine, status)
        }
        SessionCommand::Status { application_id } => {
            let status = session.current_status(application_id)?;
            status_reply(engine, status)
        }
        SessionCommand::Funding { amount } => {
            json!({ "sources": engine.funding().eligible_for(*amount) })
        }
        SessionCommand::Quote { source, amount, term_months } => {
            json!({ "quote": engine.funding().quote(source, *amount, *term_months)? })
        }
        SessionCommand::Quit => json!({}),
    };
    Ok(reply)
}

fn status_reply(engine: &DecisionEngine, status: ApplicationStatus) -> serde_json::Value {
    let guidance = status.guidance();
    let alternatives = if guidance.show_alternatives {
        engine.funding().alternatives().to_vec()
    } else {
        Vec::new()
    };
    json!({
        "status": status,
        "guidance": guidance,
        "alternatives": alternatives,
    })
}

fn notices_for(events: &[DecisionEvent]) -> Vec<Notice> {
    events.iter().filter_map(Notice::for_event).collect()
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
