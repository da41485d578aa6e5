use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::filter::{Filter, by_projects, by_tags_any};
use crate::errors::AppResult;
use crate::models::Record;
use crate::store::Track;
use crate::ui::messages::info;
use crate::utils::date::parse_period;
use crate::utils::format_hours;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        projects,
        tags,
        reverse,
    } = cmd
    {
        let track = Track::from_config(cfg);

        let mut filter = Filter::all();
        if let Some(p) = period {
            let (start, end) = parse_period(p)?;
            filter = filter.between(Some(start), Some(end));
        }
        if !projects.is_empty() {
            filter = filter.with(by_projects(projects));
        }
        if !tags.is_empty() {
            filter = filter.with(by_tags_any(tags));
        }

        let records: Vec<Record> = track.scan(filter, *reverse).collect::<AppResult<_>>()?;
        if records.is_empty() {
            info("No records found");
            return Ok(());
        }

        print!("{}", render_records(&records, cfg));
        println!("{} record(s)", records.len());
    }
    Ok(())
}

fn render_records(records: &[Record], cfg: &Config) -> String {
    let mut table = Table::new(vec![
        Column::new("Start"),
        Column::new("End"),
        Column::new("Project"),
        Column::new("Work"),
        Column::new("Pause"),
        Column::new("Note"),
    ]);

    for r in records {
        table.add_row(vec![
            r.start.format(&cfg.date_format).to_string(),
            r.end
                .map(|e| e.format(&cfg.date_format).to_string())
                .unwrap_or_else(|| "running".to_string()),
            r.project.clone(),
            format_hours(r.duration(None, None), true),
            format_hours(r.pause_duration(None, None), true),
            r.note.clone(),
        ]);
    }

    table.render(cfg.separator())
}
