use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fireground_core::builder::{equipment_allows, rule_for_day};
use fireground_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fireground")]
#[command(about = "Deterministic workout program builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Exercise library JSON (defaults to the built-in library)
    #[arg(long, global = true)]
    library: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a new program and make it the active one
    Build {
        /// Goal type (build muscle, lose fat, maintain)
        #[arg(long)]
        goal: Option<String>,

        /// Experience level (beginner, intermediate, advanced)
        #[arg(long)]
        experience: Option<String>,

        /// Block length in weeks
        #[arg(long)]
        weeks: Option<u32>,

        /// Training days per week
        #[arg(long)]
        days: Option<u32>,

        /// Add a Fireground readiness day to each week
        #[arg(long)]
        fireground: bool,

        /// Available equipment (repeatable)
        #[arg(long = "equipment")]
        equipment: Vec<String>,

        /// First day of the block (YYYY-MM-DD), today if omitted
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Dry run - print the program without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the current day of the active program (default)
    Show {
        /// Show every day instead
        #[arg(long)]
        all: bool,
    },

    /// Move to the next day of the active program
    Advance,

    /// Suggest replacements for an exercise of the current day
    Swap {
        /// Exercise id as shown by `show`
        exercise_id: String,

        /// Maximum number of suggestions
        #[arg(long, default_value_t = replacement::DEFAULT_REPLACEMENT_LIMIT)]
        limit: usize,

        /// List the exercise's curated replacements first
        #[arg(long)]
        curated: bool,
    },

    /// Check the active program for empty days and duplicates
    Validate,

    /// Export the active program as CSV
    Export {
        /// Output file
        path: PathBuf,
    },

    /// List the exercise library
    Library,
}

fn main() -> Result<()> {
    fireground_core::logging::init("warn")?;

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let program_path = data_dir.join("active_program.json");
    tracing::debug!("Active program at {:?}", program_path);

    let library_path = cli.library.or_else(|| config.library.path.clone());
    let loaded;
    let library = match library_path {
        Some(path) => {
            loaded = Library::load_from(&path)?;
            &loaded
        }
        None => default_library(),
    };

    match cli.command {
        Some(Commands::Build {
            goal,
            experience,
            weeks,
            days,
            fireground,
            equipment,
            start,
            dry_run,
        }) => {
            let mut request = config.goals_request();
            request.goal_type = goal.or(request.goal_type);
            request.experience_level = experience.or(request.experience_level);
            request.duration_weeks = weeks.or(request.duration_weeks);
            request.days_per_week = days.or(request.days_per_week);
            request.include_fireground |= fireground;
            if !equipment.is_empty() {
                request.equipment = equipment;
            }
            request.start_date = start;
            cmd_build(&program_path, library, request, dry_run)
        }
        Some(Commands::Show { all }) => cmd_show(&program_path, all),
        Some(Commands::Advance) => cmd_advance(&program_path),
        Some(Commands::Swap {
            exercise_id,
            limit,
            curated,
        }) => cmd_swap(&program_path, library, &exercise_id, limit, curated),
        Some(Commands::Validate) => cmd_validate(&program_path),
        Some(Commands::Export { path }) => cmd_export(&program_path, &path),
        Some(Commands::Library) => cmd_library(library),
        None => cmd_show(&program_path, false),
    }
}

fn cmd_build(
    program_path: &Path,
    library: &Library,
    request: GoalsRequest,
    dry_run: bool,
) -> Result<()> {
    let goals = Goals::from_request(request, Utc::now().date_naive())?;

    for problem in library.validate() {
        eprintln!("Library warning: {}", problem);
    }

    // Carry recency over from the program being replaced
    let seed = ActiveProgram::load(program_path)?
        .map(|program| program.recent_history())
        .unwrap_or_default();

    let (days, _) = build_program_with_history(&goals, library, seed);

    for (i, day) in days.iter().enumerate() {
        display_day(i, day);
    }

    for finding in validate_program(&days) {
        eprintln!("Warning: {}", finding);
    }

    if dry_run {
        println!("[Dry run - program not saved]");
        return Ok(());
    }

    let program = ActiveProgram::new(goals, days, Utc::now());
    program.save(program_path)?;

    println!("✓ Saved {}-day program", program.days.len());
    println!("  File: {}", program_path.display());
    Ok(())
}

fn cmd_show(program_path: &Path, all: bool) -> Result<()> {
    let program = require_program(program_path)?;

    if all {
        for (i, day) in program.days.iter().enumerate() {
            let marker = if i == program.current_day { "→ " } else { "" };
            print!("{}", marker);
            display_day(i, day);
        }
        return Ok(());
    }

    match program.current() {
        Some(day) => display_day(program.current_day, day),
        None => println!("Active program has no days."),
    }
    Ok(())
}

fn cmd_advance(program_path: &Path) -> Result<()> {
    let mut moved = false;
    let program = ActiveProgram::update(program_path, |program| {
        moved = program.advance();
        Ok(())
    })?;

    if !moved {
        println!("Already on the last day of the program.");
    }
    if let Some(day) = program.current() {
        display_day(program.current_day, day);
    }
    Ok(())
}

fn cmd_swap(
    program_path: &Path,
    library: &Library,
    exercise_id: &str,
    limit: usize,
    curated_first: bool,
) -> Result<()> {
    let program = require_program(program_path)?;
    let day = program
        .current()
        .ok_or_else(|| Error::State("Active program has no days".into()))?;

    let current = day
        .exercises
        .iter()
        .map(|p| &p.exercise)
        .find(|ex| ex.id == exercise_id)
        .ok_or_else(|| {
            Error::Other(format!("'{}' is not part of {}", exercise_id, day.title))
        })?;

    let (_, rule) = rule_for_day(&program.goals, program.current_day);
    let ctx = program.goals.user_context();
    let pool: Vec<&Exercise> = library
        .iter()
        .filter(|ex| equipment_allows(ex, &program.goals.equipment))
        .collect();
    let history = program.recent_history();
    let options = ReplaceOptions {
        limit,
        history: history.as_slice(),
        curated_first,
        ..ReplaceOptions::default()
    };

    let suggestions = suggest_replacements(current, &pool, &ctx, &rule, &options);
    if suggestions.is_empty() {
        println!("No replacements found for {}.", current.name);
        return Ok(());
    }

    println!("Replacements for {}:", current.name);
    for ex in suggestions {
        println!("  {:<28} {}", ex.id, ex.name);
    }
    Ok(())
}

fn cmd_validate(program_path: &Path) -> Result<()> {
    let program = require_program(program_path)?;
    let findings = validate_program(&program.days);

    if findings.is_empty() {
        println!("✓ Program is valid ({} days)", program.days.len());
        return Ok(());
    }

    for finding in &findings {
        println!("  - {}", finding);
    }
    Err(Error::Other(format!("{} problems found", findings.len())))
}

fn cmd_export(program_path: &Path, out: &Path) -> Result<()> {
    let program = require_program(program_path)?;
    let rows = export_csv(&program.days, out)?;

    println!("✓ Exported {} exercises to CSV", rows);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn cmd_library(library: &Library) -> Result<()> {
    for ex in library {
        println!("  {:<28} {:<32} {}", ex.id, ex.name, ex.category);
    }
    println!("{} exercises", library.len());

    let problems = library.validate();
    if !problems.is_empty() {
        eprintln!("Library validation errors:");
        for problem in problems {
            eprintln!("  - {}", problem);
        }
    }
    Ok(())
}

fn require_program(program_path: &Path) -> Result<ActiveProgram> {
    ActiveProgram::load(program_path)?.ok_or_else(|| {
        Error::State("No active program - run `fireground build` first".into())
    })
}

fn display_day(index: usize, day: &ProgramDay) {
    println!("Day {} · {} · {}", index + 1, day.date, day.title);
    if day.exercises.is_empty() {
        println!("  (no exercises)");
    }
    for prescribed in &day.exercises {
        println!(
            "  {:<32} {} x {:<3} [{}]",
            prescribed.exercise.name, prescribed.sets, prescribed.reps, prescribed.exercise.id
        );
    }
    println!();
}
