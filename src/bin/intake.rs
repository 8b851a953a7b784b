use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use onpoint_analyzer::client::{SubmissionClient, SubmitError};
use onpoint_analyzer::enums::{InvestmentGoal, RiskAppetite, Timeframe};
use onpoint_analyzer::error::FieldError;
use onpoint_analyzer::form::{
    format_usd, FormFlow, FormStep, HoldingField, HoldingsEditor, SubmitBlocked, ANALYSIS_FEE_USDT,
    COIN_OPTIONS, PAYMENT_WALLET_ADDRESS,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "intake=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("INTAKE_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    tracing::debug!("Submitting to {}", base_url);
    let client = SubmissionClient::new(base_url);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    run(&mut input, &client).await
}

enum StepAction {
    Next,
    Back,
    Stay,
    Quit,
}

async fn run(input: &mut impl BufRead, client: &SubmissionClient) -> Result<()> {
    let mut flow = FormFlow::new();

    println!("OnPoint portfolio analysis intake");

    loop {
        let step = flow.step();
        println!();
        println!(
            "Step {} of {}: {}",
            step.number(),
            FormStep::COUNT,
            step.title()
        );

        let action = match step {
            FormStep::Profile => {
                fill_profile(input, &mut flow)?;
                StepAction::Next
            }
            FormStep::Holdings => fill_holdings(input, &mut flow)?,
            FormStep::Payment => match payment_step(input, &mut flow, client).await? {
                None => return Ok(()),
                Some(action) => action,
            },
        };

        match action {
            StepAction::Next => {
                if let Err(errors) = flow.advance() {
                    print_field_errors(&errors);
                }
            }
            StepAction::Back => {
                flow.back();
            }
            StepAction::Stay => {}
            StepAction::Quit => {
                println!("No request was submitted.");
                return Ok(());
            }
        }
    }
}

fn fill_profile(input: &mut impl BufRead, flow: &mut FormFlow) -> Result<()> {
    flow.name = prompt(input, "Name (optional)", &flow.name)?;
    flow.email = prompt(input, "Email", &flow.email)?;

    let goals: Vec<(&str, &str)> = InvestmentGoal::all()
        .iter()
        .map(|g| (g.as_str(), g.label()))
        .collect();
    flow.investment_goals = choose(input, "Investment goal", &goals, &flow.investment_goals)?;

    let risks: Vec<(&str, &str)> = RiskAppetite::all()
        .iter()
        .map(|r| (r.as_str(), r.label()))
        .collect();
    flow.risk_appetite = choose(input, "Risk appetite", &risks, &flow.risk_appetite)?;

    let timeframes: Vec<(&str, &str)> = Timeframe::all()
        .iter()
        .map(|t| (t.as_str(), t.label()))
        .collect();
    flow.timeframe = choose(input, "Investment timeframe", &timeframes, &flow.timeframe)?;

    Ok(())
}

fn fill_holdings(input: &mut impl BufRead, flow: &mut FormFlow) -> Result<StepAction> {
    let suggestions: Vec<&str> = COIN_OPTIONS.iter().map(|(symbol, _)| *symbol).collect();
    println!("Common coins: {}", suggestions.join(", "));

    loop {
        print_rows(&flow.holdings);
        let line = prompt(
            input,
            "a=add, e N=edit, r N=remove, Enter=continue, b=back, q=quit",
            "",
        )?;
        let cmd = line.trim();

        match cmd {
            "" => return Ok(StepAction::Next),
            "b" => return Ok(StepAction::Back),
            "q" => return Ok(StepAction::Quit),
            "a" => {
                let id = flow.holdings.add();
                edit_row(input, &mut flow.holdings, &id)?;
            }
            _ => {
                if let Some(arg) = cmd.strip_prefix("e ") {
                    match row_id(&flow.holdings, arg) {
                        Some(id) => edit_row(input, &mut flow.holdings, &id)?,
                        None => println!("No row {}", arg),
                    }
                } else if let Some(arg) = cmd.strip_prefix("r ") {
                    match row_id(&flow.holdings, arg) {
                        Some(id) => {
                            if !flow.holdings.remove(&id) {
                                println!("Keep at least one holding");
                            }
                        }
                        None => println!("No row {}", arg),
                    }
                } else {
                    println!("Unknown command: {}", cmd);
                }
            }
        }
    }
}

async fn payment_step(
    input: &mut impl BufRead,
    flow: &mut FormFlow,
    client: &SubmissionClient,
) -> Result<Option<StepAction>> {
    println!(
        "Please send {} USDT (TRC20) to {}",
        ANALYSIS_FEE_USDT, PAYMENT_WALLET_ADDRESS
    );
    println!(
        "Portfolio value for analysis: {}",
        format_usd(flow.holdings.total_value())
    );

    flow.tx_hash = prompt(input, "Transaction hash (optional)", &flow.tx_hash)?;

    let line = prompt(input, "Press Enter to submit (b=back, q=quit)", "")?;
    match line.trim() {
        "b" => return Ok(Some(StepAction::Back)),
        "q" => return Ok(Some(StepAction::Quit)),
        _ => {}
    }

    let payload = match flow.begin_submission() {
        Ok(payload) => payload,
        Err(SubmitBlocked::Invalid(errors)) => {
            print_field_errors(&errors);
            println!("Go back and fix the fields above.");
            return Ok(Some(StepAction::Stay));
        }
        Err(SubmitBlocked::AlreadyPending) | Err(SubmitBlocked::NotOnPaymentStep) => {
            return Ok(Some(StepAction::Stay));
        }
    };

    let email = flow.email.clone();
    match client.create_analysis_request(&payload).await {
        Ok(receipt) => {
            println!("{}", receipt.message);
            println!(
                "Request #{} received. Your analysis will be delivered to {} within 24 hours.",
                receipt.request_id, email
            );
            flow.finish_success();
            Ok(None)
        }
        Err(SubmitError::Rejected { message, errors }) => {
            println!("{}", message);
            print_field_errors(&errors);
            flow.finish_failure();
            Ok(Some(StepAction::Stay))
        }
        Err(other) => {
            println!("Submission failed: {}. Your answers are kept; try again.", other);
            flow.finish_failure();
            Ok(Some(StepAction::Stay))
        }
    }
}

fn edit_row(input: &mut impl BufRead, editor: &mut HoldingsEditor, id: &str) -> Result<()> {
    let (coin, quantity, price) = editor
        .rows()
        .iter()
        .find(|row| row.id() == id)
        .map(|row| (row.coin.clone(), row.quantity, row.avg_buy_price))
        .unwrap_or_default();

    let coin_in = prompt(input, "Coin", &coin)?;
    editor.update(id, HoldingField::Coin, &coin_in);

    let quantity_in = prompt(input, "Quantity", &number_default(quantity))?;
    editor.update(id, HoldingField::Quantity, &quantity_in);

    let price_in = prompt(input, "Average buy price (USD)", &number_default(price))?;
    editor.update(id, HoldingField::AvgBuyPrice, &price_in);

    Ok(())
}

fn print_rows(editor: &HoldingsEditor) {
    println!("Holdings:");
    for (i, row) in editor.rows().iter().enumerate() {
        let coin = if row.coin.is_empty() {
            "?"
        } else {
            row.coin.as_str()
        };
        println!(
            "  {}. {:<6} qty {:<12} @ {:<14} = {}",
            i + 1,
            coin,
            row.quantity,
            format_usd(row.avg_buy_price),
            format_usd(row.value()),
        );
    }
    println!("  Total: {}", format_usd(editor.total_value()));
}

fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        println!("  - {}", error.message);
    }
}

fn row_id(editor: &HoldingsEditor, arg: &str) -> Option<String> {
    let n: usize = arg.trim().parse().ok()?;
    editor
        .rows()
        .get(n.checked_sub(1)?)
        .map(|row| row.id().to_string())
}

fn number_default(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format!("{}", value)
    }
}

/// Prints a numbered menu and reads a selection, returning the chosen
/// option's wire value. An empty answer keeps the current choice.
fn choose(
    input: &mut impl BufRead,
    title: &str,
    options: &[(&str, &str)],
    current: &str,
) -> Result<String> {
    println!("{}:", title);
    for (i, (value, label)) in options.iter().enumerate() {
        let marker = if *value == current { "*" } else { " " };
        println!(" {} {}. {}", marker, i + 1, label);
    }

    loop {
        let answer = prompt(input, "Select", "")?;
        if answer.is_empty() {
            return Ok(current.to_string());
        }
        match answer.parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => return Ok(options[n - 1].0.to_string()),
            _ => println!("Enter a number between 1 and {}", options.len()),
        }
    }
}

/// Reads one line with an optional current value shown in brackets.
/// An empty answer keeps the current value; end of input is an error.
fn prompt(input: &mut impl BufRead, label: &str, current: &str) -> Result<String> {
    if current.is_empty() {
        print!("{}: ", label);
    } else {
        print!("{} [{}]: ", label, current);
    }
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("input ended");
    }

    let answer = line.trim();
    if answer.is_empty() && !current.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(answer.to_string())
    }
}
