use crate::config::Config;
use crate::errors::AppResult;
use crate::store::Track;
use crate::ui::messages::{info, warning};
use crate::utils::format_hours;
use crate::utils::formatting::bold;

/// Show the running record, if any.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let track = Track::from_config(cfg);

    let Some(record) = track.open_record()? else {
        info("No running record");
        return Ok(());
    };

    println!(
        "{} since {}",
        bold(&record.project),
        record.start.format(&cfg.date_format)
    );
    if !record.note.is_empty() {
        println!("  note:   {}", record.note);
    }
    println!("  worked: {}", format_hours(record.duration(None, None), false));
    println!(
        "  paused: {}",
        format_hours(record.pause_duration(None, None), false)
    );

    if record.is_paused() {
        warning(format!(
            "Paused for {}",
            format_hours(record.current_pause_duration(None, None), false)
        ));
    }
    Ok(())
}
