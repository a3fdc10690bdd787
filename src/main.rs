use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vocadr::app::QuizApp;
use vocadr::session::grader::GradeMode;
use vocadr::session::quiz::QuestionView;

#[derive(Parser)]
#[command(
    name = "vocadr",
    version,
    about = "Adaptive vocabulary quiz with weighted word repetition"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a quiz session for one lesson
    Quiz {
        #[arg(short, long, help = "Lesson id (see `vocadr lessons`)")]
        lesson: String,

        #[arg(short, long, help = "Number of questions")]
        count: Option<usize>,

        #[arg(long, help = "Answer mode: forms or meaning")]
        mode: Option<String>,

        #[arg(long, help = "Only replay words answered wrong before")]
        wrong_only: bool,
    },
    /// List available lessons
    Lessons,
    /// Show per-word statistics
    Stats,
    /// Show past session results
    History,
    /// Show or persist quiz defaults
    Config {
        #[arg(long, help = "Default number of questions")]
        count: Option<usize>,

        #[arg(long, help = "Default answer mode: forms or meaning")]
        mode: Option<String>,

        #[arg(long, help = "Directory holding lesson files")]
        lessons_dir: Option<String>,
    },
    /// Erase all word statistics and session history
    Clear {
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut app = QuizApp::new()?;

    match cli.command {
        Command::Quiz {
            lesson,
            count,
            mode,
            wrong_only,
        } => {
            let mode = match mode.as_deref() {
                Some("meaning") => Some(GradeMode::Membership),
                Some("forms") => Some(GradeMode::ExactSequence),
                Some(other) => anyhow::bail!("unknown mode {other:?} (expected forms or meaning)"),
                None => None,
            };
            run_quiz(&mut app, &lesson, count, mode, wrong_only)?;
        }
        Command::Lessons => {
            for lesson in app.lessons()? {
                println!("{}  {}", lesson.id, lesson.name);
            }
        }
        Command::Stats => {
            let rows = app.stats_summary();
            if rows.is_empty() {
                println!("No word statistics yet.");
            }
            for row in rows {
                println!("{}: correct {} / wrong {}", row.id, row.correct, row.wrong);
            }
        }
        Command::History => {
            let entries = app.history().all();
            if entries.is_empty() {
                println!("No quiz history yet.");
            }
            for entry in entries {
                println!(
                    "{}  {}: {}/{}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.lesson_id,
                    entry.correct_count,
                    entry.total_count
                );
            }
        }
        Command::Config {
            count,
            mode,
            lessons_dir,
        } => {
            let changed = count.is_some() || mode.is_some() || lessons_dir.is_some();
            if let Some(count) = count {
                app.config.question_count = count;
            }
            if let Some(mode) = mode {
                app.config.mode = mode;
            }
            if let Some(dir) = lessons_dir {
                app.config.lessons_dir = dir;
            }
            if changed {
                app.config.validate();
                app.config.save()?;
            }
            println!("question_count = {}", app.config.question_count);
            println!("mode = {}", app.config.mode);
            println!("lessons_dir = {}", app.config.lessons_dir);
        }
        Command::Clear { yes } => {
            if yes || confirm("Erase all word statistics and history?")? {
                app.clear_all_progress()?;
                println!("Cleared.");
            }
        }
    }

    Ok(())
}

fn run_quiz(
    app: &mut QuizApp,
    lesson: &str,
    count: Option<usize>,
    mode: Option<GradeMode>,
    wrong_only: bool,
) -> Result<()> {
    app.start_quiz(lesson, count, mode, wrong_only)?;

    if app.is_quiz_complete() {
        println!("Nothing to ask: no words matched.");
        app.finish_quiz()?;
        return Ok(());
    }

    let total = app.session().map(|s| s.len()).unwrap_or(0);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !app.is_quiz_complete() {
        let view = app.current_view()?;
        let asked = app.session().map(|s| s.position() + 1).unwrap_or(0);
        println!("\n[{asked}/{total}] {}", view.prompt);

        let fields = match read_fields(&mut lines, &view)? {
            Some(fields) => fields,
            None => {
                // EOF: walk away mid-session, grades so far stand.
                app.abandon_quiz();
                println!("\nSession abandoned.");
                return Ok(());
            }
        };

        let graded = app.submit_answer(&fields)?;
        if graded.correct {
            println!("✔ correct");
        } else {
            println!("✖ {}", graded.expected.join(" – "));
        }
        app.next()?;
    }

    let result = app.finish_quiz()?;
    println!(
        "\nDone! {}/{} correct.",
        result.correct_count, result.total_count
    );
    Ok(())
}

/// One line per field, so accepted forms with internal spaces stay
/// enterable. Returns None on EOF.
fn read_fields(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    view: &QuestionView,
) -> Result<Option<Vec<String>>> {
    let mut fields = Vec::with_capacity(view.field_count);
    for i in 0..view.field_count {
        if view.field_count > 1 {
            print!("form {}/{} > ", i + 1, view.field_count);
        } else {
            print!("> ");
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        fields.push(line?);
    }
    Ok(Some(fields))
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
