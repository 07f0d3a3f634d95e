//! Command-line adapter: parses arguments, builds a [`ViewContext`], runs the
//! requested view and renders it as text.

pub mod render;

use std::{env, path::PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::{
    config::ConfigManager,
    errors::LedgerError,
    ledger::YearMonth,
    storage::{JsonFileStore, LedgerStore},
    views::{
        category_breakdown, upcoming, year_heatmap, LedgerView, RecurrenceFilter,
        TransactionFilter, TypeFilter, ViewContext,
    },
};

use render::{month_name, parse_day, Renderer};

pub const TODAY_ENV: &str = "LEDGER_CORE_TODAY";
const DEFAULT_UPCOMING_DAYS: u32 = 30;

pub const USAGE: &str = "\
Usage: ledger_core_cli [--file PATH] [--type all|income|expense] [--category ID]
                       [--recurring all|recurring|active|inactive] <command> [arg]

Commands:
  month [YYYY-MM]        monthly totals compared with the previous month
  week [YYYY-MM-DD]      Monday-to-Sunday totals
  day [YYYY-MM-DD]       every transaction on one day
  calendar [YYYY-MM]     month grid with daily net amounts
  heatmap [YYYY]         daily spending intensity for a year
  categories [YYYY-MM]   spending per category
  predict                month-end balance forecast
  list [LIMIT]           transaction list, newest first
  upcoming [DAYS]        recurring transactions due soon
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Month(Option<YearMonth>),
    Week(Option<NaiveDate>),
    Day(Option<NaiveDate>),
    Calendar(Option<YearMonth>),
    Heatmap(Option<i32>),
    Categories(Option<YearMonth>),
    Predict,
    List(Option<usize>),
    Upcoming(u32),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub file: Option<PathBuf>,
    pub filter: TransactionFilter,
    pub command: Command,
}

fn invalid(message: impl Into<String>) -> LedgerError {
    LedgerError::InvalidInput(message.into())
}

fn parse_with<T>(
    raw: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
    what: &str,
) -> Result<Option<T>, LedgerError> {
    match raw {
        None => Ok(None),
        Some(value) => parse(&value)
            .map(Some)
            .ok_or_else(|| invalid(format!("invalid {what} `{value}`"))),
    }
}

pub fn parse_args<I>(args: I) -> Result<Invocation, LedgerError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut file = None;
    let mut filter = TransactionFilter::new();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| invalid(format!("missing value for {flag}")))
        };
        match arg.as_str() {
            "--file" => file = Some(PathBuf::from(value_for("--file")?)),
            "--type" => {
                filter.kind = match value_for("--type")?.as_str() {
                    "all" => TypeFilter::All,
                    "income" => TypeFilter::Income,
                    "expense" => TypeFilter::Expense,
                    other => return Err(invalid(format!("unknown type filter `{other}`"))),
                }
            }
            "--category" => filter.category_id = Some(value_for("--category")?),
            "--recurring" => {
                filter.recurrence = match value_for("--recurring")?.as_str() {
                    "all" => RecurrenceFilter::All,
                    "recurring" => RecurrenceFilter::Recurring,
                    "active" => RecurrenceFilter::Active,
                    "inactive" => RecurrenceFilter::Inactive,
                    other => return Err(invalid(format!("unknown recurrence filter `{other}`"))),
                }
            }
            "-h" | "--help" => positional.push("help".to_string()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let name = positional.next().unwrap_or_else(|| "help".to_string());
    let arg = positional.next();
    let month = |raw| parse_with(raw, |value| YearMonth::parse(value).ok(), "month");
    let day = |raw| parse_with(raw, parse_day, "date");

    let command = match name.as_str() {
        "month" => Command::Month(month(arg)?),
        "week" => Command::Week(day(arg)?),
        "day" => Command::Day(day(arg)?),
        "calendar" => Command::Calendar(month(arg)?),
        "categories" => Command::Categories(month(arg)?),
        "heatmap" => Command::Heatmap(parse_with(arg, |value| value.parse().ok(), "year")?),
        "predict" => Command::Predict,
        "list" => Command::List(parse_with(arg, |value| value.parse().ok(), "limit")?),
        "upcoming" => Command::Upcoming(
            parse_with(arg, |value| value.parse().ok(), "day count")?
                .unwrap_or(DEFAULT_UPCOMING_DAYS),
        ),
        "help" => Command::Help,
        other => return Err(invalid(format!("unknown command `{other}`"))),
    };

    Ok(Invocation {
        file,
        filter,
        command,
    })
}

/// Today's date, overridable through `LEDGER_CORE_TODAY` for reproducible output.
pub fn today_from_env() -> Result<NaiveDate, LedgerError> {
    match env::var(TODAY_ENV) {
        Ok(raw) => {
            parse_day(&raw).ok_or_else(|| invalid(format!("invalid {TODAY_ENV} `{raw}`")))
        }
        Err(_) => Ok(chrono::Local::now().date_naive()),
    }
}

/// Runs `invocation` against the configured ledger and returns the rendered text.
pub fn execute(
    invocation: &Invocation,
    today: NaiveDate,
    configs: &ConfigManager,
) -> Result<String, LedgerError> {
    if invocation.command == Command::Help {
        return Ok(USAGE.to_string());
    }

    let config = configs.load()?;
    let path = invocation
        .file
        .clone()
        .unwrap_or_else(|| configs.ledger_path(&config));
    let data = JsonFileStore::new(path).load()?;

    let mut context = ViewContext::new(today).with_filter(invocation.filter.clone());
    match &invocation.command {
        Command::Month(Some(month))
        | Command::Calendar(Some(month))
        | Command::Categories(Some(month)) => context = context.with_focus(month.first_day()),
        Command::Week(Some(date)) | Command::Day(Some(date)) => {
            context = context.with_focus(*date)
        }
        _ => {}
    }

    let view = LedgerView::new(&data, context);
    let renderer = Renderer::new(&config.currency, &data);
    tracing::debug!(command = ?invocation.command, %today, "rendering view");

    let output = match &invocation.command {
        Command::Month(_) => renderer.month(&view.month_summary()),
        Command::Week(_) => renderer.week(&view.week_summary()),
        Command::Day(_) => renderer.day(&view.day_summary()),
        Command::Calendar(_) => renderer.calendar(&view.calendar()),
        Command::Heatmap(year) => {
            renderer.heatmap(&year_heatmap(&view.filtered(), year.unwrap_or(today.year())))
        }
        Command::Categories(_) => {
            let month = view.context().focus_month();
            let breakdown =
                category_breakdown(&view.filtered(), &month.window(), &data.categories);
            let title = format!("Spending {} {}", month_name(month.month()), month.year());
            renderer.categories(title, &breakdown)
        }
        Command::Predict => renderer.prediction(&view.prediction()),
        Command::List(limit) => {
            renderer.list(&view.list(Some(limit.unwrap_or(config.list_limit))))
        }
        Command::Upcoming(days) => {
            renderer.upcoming(&upcoming(&view.filtered(), today, *days), *days)
        }
        Command::Help => USAGE.to_string(),
    };
    Ok(output)
}
