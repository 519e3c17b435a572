//! `show`: the indicator board.

use crate::cli::commands::{load_state, open};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::gate::FREE_INDICATOR_LIMIT;
use crate::core::grouper::{DeadlineLabel, group_pending_actions, undated_pending};
use crate::errors::AppResult;
use crate::models::{ActionItem, Indicator};
use crate::ui::messages::{header, info, warning};
use crate::utils::date::{self, parse_date_arg};
use crate::utils::formatting::{bold, format_contribution, format_value, italic};
use ansi_term::Colour;
use chrono::NaiveDate;

const WRAP_WIDTH: usize = 72;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Show {
        id,
        today,
        completed,
    } = cmd
    else {
        return Ok(());
    };

    let today = match today {
        Some(d) => parse_date_arg(d)?,
        None => date::today(),
    };

    let pool = open(cfg)?;
    let state = load_state(&pool, cfg)?;

    if state.is_over_limit() {
        warning(format!(
            "Your free plan allows {} indicators and you have {}. Upgrade to the basic plan to keep adding.",
            FREE_INDICATOR_LIMIT,
            state.indicator_count()
        ));
    }

    let selected: Vec<&Indicator> = match id {
        Some(id) => vec![state.indicator(*id)?],
        None => state.indicators.iter().collect(),
    };

    if selected.is_empty() {
        info("No indicators yet. Create one with `metahub indicator add`.");
        return Ok(());
    }

    for ind in selected {
        print_indicator(ind, cfg, today, *completed);
    }

    Ok(())
}

fn label_colour(label: DeadlineLabel) -> Colour {
    match label {
        DeadlineLabel::Overdue => Colour::Red,
        DeadlineLabel::Today => Colour::Yellow,
        DeadlineLabel::Tomorrow => Colour::Cyan,
        DeadlineLabel::Day(_) => Colour::White,
    }
}

fn print_indicator(ind: &Indicator, cfg: &Config, today: NaiveDate, show_completed: bool) {
    let fmt = |v: f64| format_value(v, ind.unit, &cfg.currency_symbol);

    header(format!("#{} {}", ind.id, ind.title));

    if let Some(desc) = &ind.description {
        for line in textwrap::wrap(desc, WRAP_WIDTH) {
            println!("  {}", italic(&line));
        }
    }

    println!(
        "  Current: {}   Target: {}   Gap: {}",
        bold(&fmt(ind.current_value())),
        fmt(ind.target_value),
        fmt(ind.gap())
    );

    if ind.is_under_planned() {
        warning(format!(
            "Still {} to plan in actions to reach the target.",
            fmt(ind.missing_planned())
        ));
    }

    let groups = group_pending_actions(&ind.actions, today);
    let undated = undated_pending(&ind.actions);

    if groups.is_empty() && undated.is_empty() {
        println!("  No pending actions.");
    }

    for group in &groups {
        println!("\n  {}", label_colour(group.label).bold().paint(&group.title));
        for action in &group.actions {
            print_action(action, ind, cfg);
        }
    }

    if !undated.is_empty() {
        println!("\n  {}", Colour::White.bold().paint("No date"));
        for action in undated {
            print_action(action, ind, cfg);
        }
    }

    if show_completed {
        let done: Vec<&ActionItem> = ind.completed_actions().collect();
        if !done.is_empty() {
            println!("\n  {}", Colour::Green.bold().paint("Completed"));
            for action in done {
                print_action(action, ind, cfg);
            }
        }
    }
}

fn print_action(action: &ActionItem, ind: &Indicator, cfg: &Config) {
    let mark = if action.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "    {mark} #{} {} ({}) {}",
        action.id,
        action.title,
        action.responsible,
        format_contribution(action.contribution, ind.unit, &cfg.currency_symbol)
    );

    if let Some(at) = action.completed_at {
        line.push_str(&format!("  done {}", at.format("%Y-%m-%d %H:%M")));
    } else if let Some(d) = action.deadline {
        line.push_str(&format!("  due {}", d.format("%Y-%m-%d")));
    }
    println!("{line}");

    if let Some(desc) = &action.description {
        for l in textwrap::wrap(desc, WRAP_WIDTH - 8) {
            println!("          {}", italic(&l));
        }
    }

    for sub in &action.sub_tasks {
        let mark = if sub.completed { "[x]" } else { "[ ]" };
        let due = sub
            .deadline
            .map(|d| format!("  due {}", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        println!(
            "        {mark} #{} {} ({}){due}",
            sub.id, sub.title, sub.responsible
        );
    }
}
