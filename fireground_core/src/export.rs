//! CSV export of a built program.
//!
//! One row per prescribed exercise, in program order.

use crate::{ProgramDay, Result};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    date: String,
    week: u32,
    title: &'a str,
    position: usize,
    exercise_id: &'a str,
    exercise_name: &'a str,
    sets: u32,
    reps: u32,
}

/// Write `days` to `path` as CSV, replacing any existing file
///
/// Returns the number of exercise rows written. A program whose days are
/// all empty still gets a header row.
pub fn export_csv(days: &[ProgramDay], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record([
        "date",
        "week",
        "title",
        "position",
        "exercise_id",
        "exercise_name",
        "sets",
        "reps",
    ])?;

    let mut rows = 0;
    for day in days {
        let date = day.date.format("%Y-%m-%d").to_string();
        for (i, prescribed) in day.exercises.iter().enumerate() {
            writer.serialize(CsvRow {
                date: date.clone(),
                week: day.week,
                title: &day.title,
                position: i + 1,
                exercise_id: &prescribed.exercise.id,
                exercise_name: &prescribed.exercise.name,
                sets: prescribed.sets,
                reps: prescribed.reps,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} exercises across {} days to {:?}", rows, days.len(), path);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::goals;
    use crate::{build_program, default_library, ExperienceLevel, GoalType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_writes_header_and_rows() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("program.csv");

        let g = goals(GoalType::Maintain, ExperienceLevel::Beginner, 1, 3);
        let days = build_program(&g, default_library());
        let expected: usize = days.iter().map(|d| d.exercises.len()).sum();

        let written = export_csv(&days, &path).unwrap();
        assert_eq!(written, expected);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("date,week,title,position,exercise_id,exercise_name,sets,reps")
        );
        assert_eq!(lines.count(), expected);

        let first = &days[0].exercises[0];
        let first_row = contents.lines().nth(1).unwrap();
        assert!(first_row.starts_with("2026-01-05,1,"));
        assert!(first_row.contains(&first.exercise.id));
    }

    #[test]
    fn test_export_empty_program_has_header_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("empty.csv");

        assert_eq!(export_csv(&[], &path).unwrap(), 0);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
