use comfy_table::{Cell, CellAlignment, Color, Table, TableComponent};

use crate::controller::Session;
use crate::summary;

const BAR_WIDTH: usize = 30;

/// Render the full dashboard: metric cards, breakdown charts and the
/// expense table. Everything shown here is recomputed from the current
/// ledger, nothing is cached between renders.
pub(crate) fn render(session: &Session) {
    let records = session.ledger.snapshot();
    if session.ledger.is_empty() {
        println!("The ledger is empty. Use 'add' or 'import' to record expenses.");
    }

    render_metrics(session);
    render_by_category(records);
    render_by_month(records);
    render_expense_table(records);
}

fn render_metrics(session: &Session) {
    let records = session.ledger.snapshot();
    let total = summary::total_expenses(records);
    let balance = summary::balance(session.salary, records);

    let mut table = plain_table();
    table.set_header(vec!["Total de Gastos", "Salário Mensal", "Saldo Atual"]);

    let balance_cell = if balance >= 0.0 {
        Cell::new(format_amount(balance)).fg(Color::Green)
    } else {
        Cell::new(format_amount(balance)).fg(Color::Red)
    };

    table.add_row(vec![
        Cell::new(format_amount(total)).set_alignment(CellAlignment::Right),
        Cell::new(format_amount(session.salary)).set_alignment(CellAlignment::Right),
        balance_cell.set_alignment(CellAlignment::Right),
    ]);

    println!("{table}");
}

fn render_by_category(records: &[crate::expense::Expense]) {
    let totals = summary::by_category(records);
    if totals.is_empty() {
        println!("No expenses to chart by category.");
        return;
    }

    let max = totals.iter().map(|(_, v)| *v).fold(0.0f32, f32::max);

    let mut table = plain_table();
    table.set_header(vec!["Categoria", "Valor", ""]);
    for (category, amount) in totals {
        table.add_row(vec![
            Cell::new(category),
            Cell::new(format_amount(amount)).set_alignment(CellAlignment::Right),
            Cell::new(bar(amount, max)),
        ]);
    }

    println!("{table}");
}

fn render_by_month(records: &[crate::expense::Expense]) {
    let totals = summary::by_month(records);
    if totals.is_empty() {
        println!("No expenses to chart by month.");
        return;
    }

    let max = totals.values().copied().fold(0.0f32, f32::max);

    let mut table = plain_table();
    table.set_header(vec!["Mês", "Valor", ""]);
    for (month, amount) in totals {
        table.add_row(vec![
            Cell::new(month),
            Cell::new(format_amount(amount)).set_alignment(CellAlignment::Right),
            Cell::new(bar(amount, max)),
        ]);
    }

    println!("{table}");
}

fn render_expense_table(records: &[crate::expense::Expense]) {
    let mut table = plain_table();
    table.set_header(vec!["#", "Data", "Categoria", "Valor"]);

    for (i, e) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(e.date.format("%Y-%m-%d")),
            Cell::new(e.category.as_str()),
            Cell::new(format_amount(e.amount)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
}

fn plain_table() -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table
}

fn format_amount(amount: f32) -> String {
    format!("R$ {:.2}", amount)
}

/// Proportional text bar for the breakdown charts.
fn bar(value: f32, max: f32) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f32).round() as usize;
    "█".repeat(len.min(BAR_WIDTH))
}
