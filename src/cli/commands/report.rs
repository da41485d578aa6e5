use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::filter::{Filter, by_archived, by_tags_any, by_time_range};
use crate::core::report::{Report, ReportLogic, TimeRange};
use crate::errors::AppResult;
use crate::store::{ProjectSource, Track};
use crate::utils::date::parse_period;
use crate::utils::format_hours;
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};
use crate::utils::time::start_of_day;
use chrono::TimeDelta;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        projects,
        period,
        tags,
        archived,
    } = cmd
    {
        let track = Track::from_config(cfg);
        let all_projects = track.load_all_projects()?;

        let mut filter = Filter::all();
        let mut window = TimeRange::default();

        if let Some(p) = period {
            let (first, last) = parse_period(p)?;
            let min = start_of_day(first)?;
            let max = start_of_day(last.succ_opt().unwrap_or(last))?;
            window = TimeRange::new(Some(min), Some(max));
            // records started the day before may run past midnight
            filter = filter
                .with(by_time_range(Some(min), Some(max)))
                .between(first.pred_opt().or(Some(first)), Some(last));
        }
        if !tags.is_empty() {
            filter = filter.with(by_tags_any(tags));
        }
        if !*archived {
            filter = filter.with(by_archived(false, all_projects.clone()));
        }

        let report = ReportLogic::new_report(&track, &all_projects, projects, filter, window)?;
        print!("{}", render_report(&report, cfg));
    }
    Ok(())
}

fn render_report(report: &Report, cfg: &Config) -> String {
    let mut table = Table::new(vec![
        Column::new("Project"),
        Column::new("Total"),
        Column::new("Own"),
    ]);

    for (depth, project) in report.tree.walk() {
        let Some(total) = report.totals.get(&project.name) else {
            continue;
        };
        let own = report.direct.get(&project.name).copied().unwrap_or_else(TimeDelta::zero);
        table.add_row(vec![
            format!("{}{}", "  ".repeat(depth), project.name),
            format_hours(*total, false),
            format_hours(own, false),
        ]);
    }

    let mut out = table.render(cfg.separator());
    let range = &report.time_range;
    if let (Some(start), Some(end)) = (range.start, range.end) {
        out.push_str(&format!(
            "\n{} {} - {} ({} records)\n",
            bold("Range:"),
            start.format(&cfg.date_format),
            end.format(&cfg.date_format),
            report.records.len()
        ));
    }
    out
}
