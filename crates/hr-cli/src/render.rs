//! Plain-text rendering of API results

use hr_models::{
    format_money, Employee, PayrollAggregates, PayrollRecord, PerformanceReview, ReviewAggregate,
};

pub fn employee(e: &Employee) -> String {
    format!("{}\t{}", e.id, e.name)
}

pub fn review(r: &PerformanceReview) -> String {
    let mut line = format!(
        "{}\t{}\t{}\t{}\t{}/5\t{}",
        r.id, r.employee_name, r.period, r.reviewer, r.rating, r.state
    );
    if let Some(next) = r.next_state() {
        line.push_str(&format!("\t(next: {})", next));
    }
    line
}

pub fn review_aggregate(a: &ReviewAggregate) -> String {
    format!(
        "{}\tavg {:.2}\t{} review(s)\tlatest {}",
        a.employee_name, a.average_rating, a.count, a.latest_state
    )
}

pub fn payroll_record(p: &PayrollRecord) -> String {
    format!(
        "{}\t{}\t{}\tbase {}\tovertime {} x {}\tbonuses {}\tdeductions {}\tnet {}",
        p.id,
        p.employee_name,
        p.period,
        format_money(p.base_salary),
        p.overtime_hours,
        format_money(p.overtime_rate),
        format_money(p.bonuses),
        format_money(p.deductions),
        format_money(p.net_pay),
    )
}

pub fn payroll_totals(aggregates: &PayrollAggregates) -> Vec<String> {
    let mut lines: Vec<String> = aggregates
        .totals_by_period
        .iter()
        .map(|t| format!("{}\t{}", t.period, format_money(t.total_net)))
        .collect();
    lines.push(format!("total\t{}", format_money(aggregates.grand_total_net)));
    lines
}
