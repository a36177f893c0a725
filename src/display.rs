use analytics::{DrawdownStatus, MetricsResult, MonthCalendar, PnlTone};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::TradeRecord;
use rust_decimal::Decimal;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Formats an amount as dollars with thousands separators, e.g. `-$1,234.50`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{cents}")
}

fn format_pct(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

fn tone_color(tone: PnlTone) -> Color {
    match tone {
        PnlTone::Positive => Color::Green,
        PnlTone::Negative => Color::Red,
        PnlTone::Flat => Color::Grey,
    }
}

fn pnl_cell(pnl: Decimal) -> Cell {
    Cell::new(format_currency(pnl))
        .fg(tone_color(PnlTone::of(pnl)))
        .set_alignment(CellAlignment::Right)
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Headline account figures, the equivalent of the dashboard's top row.
pub fn summary_table(metrics: &MetricsResult) -> Table {
    let mut table = new_table(vec!["Metric", "Value"]);

    let status = match metrics.drawdown_status {
        DrawdownStatus::Healthy => Cell::new("Healthy").fg(Color::Green),
        DrawdownStatus::Warning => Cell::new("Warning").fg(Color::Yellow),
        DrawdownStatus::Breached => Cell::new("Breached").fg(Color::Red),
    };
    let on_target = |hit: bool| if hit { " (on target)" } else { "" };

    table.add_row(vec![
        Cell::new("Balance"),
        Cell::new(format_currency(metrics.current_balance)),
    ]);
    table.add_row(vec![Cell::new("Net P&L"), pnl_cell(metrics.net_pnl)]);
    table.add_row(vec![
        Cell::new("Trades"),
        Cell::new(format!(
            "{} ({} W / {} L / {} BE)",
            metrics.total_trades,
            metrics.winning_trades,
            metrics.losing_trades,
            metrics.breakeven_trades
        )),
    ]);
    table.add_row(vec![
        Cell::new("Win Rate"),
        Cell::new(format!(
            "{}{}",
            format_pct(metrics.win_rate_pct),
            on_target(metrics.kpis.win_rate_on_target)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Profit Factor"),
        Cell::new(format!(
            "{:.2}{}",
            metrics.profit_factor.round_dp(2),
            on_target(metrics.kpis.profit_factor_on_target)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Avg Win / Avg Loss"),
        Cell::new(format!(
            "{} / {}",
            format_currency(metrics.average_win),
            format_currency(metrics.average_loss)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Drawdown"),
        Cell::new(format!(
            "{} now, {} max ({} of limit)",
            format_currency(metrics.current_drawdown),
            format_currency(metrics.max_drawdown),
            format_pct(metrics.drawdown_utilization * Decimal::ONE_HUNDRED)
        )),
    ]);
    table.add_row(vec![Cell::new("Risk Status"), status]);
    table.add_row(vec![
        Cell::new("Liquidation Level"),
        Cell::new(format_currency(metrics.levels.liquidation_threshold)),
    ]);
    table.add_row(vec![
        Cell::new("Goal"),
        Cell::new(format!(
            "{} ({} done, {} to go)",
            format_currency(metrics.goal.goal_balance),
            format_pct(metrics.goal.progress * Decimal::ONE_HUNDRED),
            format_currency(metrics.goal.remaining)
        )),
    ]);

    table
}

/// The radar axes and the overall score.
pub fn score_table(metrics: &MetricsResult) -> Table {
    let mut table = new_table(vec!["Axis", "Score"]);
    for (label, value) in metrics.score.axes() {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{:.1}", value.round_dp(1))).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Overall"),
        Cell::new(format!("{:.1}", metrics.score.overall.round_dp(1)))
            .set_alignment(CellAlignment::Right),
    ]);
    table
}

/// The equity curve, one row per trade in date order.
pub fn equity_table(metrics: &MetricsResult) -> Table {
    let mut table = new_table(vec!["#", "Date", "P&L", "Equity", "Peak", "Drawdown"]);
    for (i, point) in metrics.equity_curve.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(point.date),
            pnl_cell(point.pnl),
            Cell::new(format_currency(point.equity)).set_alignment(CellAlignment::Right),
            Cell::new(format_currency(point.peak)).set_alignment(CellAlignment::Right),
            Cell::new(format_currency(point.drawdown())).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// The trade history as given; callers pass it newest first.
pub fn trades_table(trades: &[TradeRecord]) -> Table {
    let mut table = new_table(vec!["Date", "Symbol", "Side", "P&L", "R", "Setup", "Notes"]);
    for trade in trades {
        table.add_row(vec![
            Cell::new(trade.date),
            Cell::new(&trade.symbol),
            Cell::new(trade.side),
            pnl_cell(trade.pnl),
            Cell::new(trade.r_multiple).set_alignment(CellAlignment::Right),
            Cell::new(&trade.setup),
            Cell::new(&trade.notes),
        ]);
    }
    table
}

/// A Monday-first month grid. Each trading day shows its P&L under the day number.
pub fn calendar_table(calendar: &MonthCalendar) -> Table {
    let mut table = new_table(WEEKDAYS.to_vec());
    for week in &calendar.weeks {
        let row: Vec<Cell> = week
            .iter()
            .map(|slot| match slot {
                None => Cell::new(""),
                Some(day) if day.trades == 0 => Cell::new(day.date.format("%d")),
                Some(day) => Cell::new(format!(
                    "{}\n{}",
                    day.date.format("%d"),
                    format_currency(day.pnl)
                ))
                .fg(tone_color(day.tone)),
            })
            .collect();
        table.add_row(row);
    }
    table
}
