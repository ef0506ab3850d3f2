use anyhow::{Context, Result};
use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use signal_desk::generator::{SignalGenerator, SignalReport, SignalRequest};
use signal_desk::models::Mode;

const MAX_HISTORY: usize = 50;

const HELP: &str = "\
Commands:
  gen                                   signal from the startup flags
  gen <tf> <mode> <levelA> <levelB> [price]
                                        mode is normal|aggressive, '-' skips price
  price                                 latest feed status
  history                               generated signals, newest first
  help                                  this text
  quit                                  exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Generate(Option<SignalRequest>),
    Price,
    History,
    Help,
    Quit,
}

/// Parses one console line. Unparsable numbers become missing values so the
/// engine reports them instead of the console.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = parts.split_first() else {
        return Ok(None);
    };

    let cmd = match head.to_lowercase().as_str() {
        "gen" | "g" => match rest {
            [] => Command::Generate(None),
            [tf, mode, a, b, price @ ..] if price.len() <= 1 => {
                let mode: Mode = mode.parse().map_err(|e| format!("{e}"))?;
                Command::Generate(Some(SignalRequest {
                    timeframe: tf.to_string(),
                    mode,
                    price_input: price.first().and_then(|p| parse_number(p)),
                    level_a: parse_number(a),
                    level_b: parse_number(b),
                }))
            }
            _ => return Err("usage: gen <tf> <mode> <levelA> <levelB> [price]".to_string()),
        },
        "price" | "p" => Command::Price,
        "history" | "h" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };

    Ok(Some(cmd))
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

pub fn render_report(report: &SignalReport) -> String {
    let mut out = Vec::new();
    out.push("=".repeat(60));
    out.push(format!("SIGNAL: {}", report.verdict.signal));
    out.push(report.detail());

    match &report.plan {
        Some(plan) => {
            let rr = |tp: f64| {
                plan.reward_ratio(tp)
                    .map(|r| format!(" (R:R {:.1})", r))
                    .unwrap_or_default()
            };
            out.push(format!("Entry: {:.2}", plan.entry));
            out.push(format!("SL: {:.2}", plan.stop_loss));
            out.push(format!("TP1: {:.2}{}", plan.take_profit_1, rr(plan.take_profit_1)));
            out.push(format!("TP2: {:.2}{}", plan.take_profit_2, rr(plan.take_profit_2)));
        }
        None => {
            out.push("Entry: -".to_string());
            out.push("SL: -".to_string());
            out.push("TP1: -".to_string());
            out.push("TP2: -".to_string());
        }
    }

    out.push(report.meta_line());
    out.push("=".repeat(60));
    out.join("\n")
}

pub fn print_report(report: &SignalReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("Failed to encode report")?;
        println!("{}", text);
    } else {
        println!("{}", render_report(report));
    }
    Ok(())
}

/// Interactive front end. Keeps its own history; the engine keeps none.
pub struct Console {
    generator: SignalGenerator,
    defaults: SignalRequest,
    json: bool,
    history: VecDeque<String>,
}

impl Console {
    pub fn new(generator: SignalGenerator, defaults: SignalRequest, json: bool) -> Self {
        Self {
            generator,
            defaults,
            json,
            history: VecDeque::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Console ready. Type 'help' for commands, Ctrl+C to stop.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutting down");
                    return Ok(());
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read stdin")? else {
                        return Ok(());
                    };
                    match parse_command(&line) {
                        Ok(Some(Command::Quit)) => return Ok(()),
                        Ok(Some(cmd)) => self.handle(cmd).await?,
                        Ok(None) => {}
                        Err(msg) => println!("{}", msg),
                    }
                }
            }
        }
    }

    async fn handle(&mut self, cmd: Command) -> Result<()> {
        match cmd {
            Command::Generate(request) => {
                let request = request.unwrap_or_else(|| self.defaults.clone());
                let report = self.generator.generate(request).await;
                print_report(&report, self.json)?;
                self.remember(report.history_line());
            }
            Command::Price => {
                let feed = self.generator.feed();
                println!("{}", feed.status());
                if let Some(snap) = feed.latest_price().await {
                    println!("Last good price at {}: {}", snap.fetched_at.to_rfc3339(), snap);
                }
            }
            Command::History => {
                if self.history.is_empty() {
                    println!("No signals yet.");
                }
                for line in &self.history {
                    println!("{}", line);
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => {}
        }
        Ok(())
    }

    fn remember(&mut self, line: String) {
        self.history.push_front(line);
        self.history.truncate(MAX_HISTORY);
    }
}
