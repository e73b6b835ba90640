use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use journo::application::{
    init::init, CompareService, ConfigService, EntryService, ExportService, MoodAnalyticsService,
    NotebookService, TagService,
};
use journo::cli::{
    self, Cli, Commands, ContentArgs, EntryCommand, ExportFormat, MoodCommand, NotebookCommand,
    TagCommand,
};
use journo::domain::authoring::markdown_to_html;
use journo::domain::{EntryChanges, Mood, NewEntry, NewNotebook, TagId, UserContext};
use journo::error::{JournoError, Result};
use journo::infrastructure::{logging, FileSystemRepository, JournalRepository};
use serde::Serialize;
use std::fs;
use std::str::FromStr;

fn main() {
    logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let config = init(&path)?;
            println!("Initialized journo journal at {}", path.display());
            println!("User: {}", config.user);
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                for (k, v) in service.list()?.entries() {
                    println!("{} = {}", k, v);
                }
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: journo config [--list | <key> [<value>]]");
                println!("Valid keys: user, renderer, render_timeout_secs, created");
            }
            Ok(())
        }
        Commands::Notebook { action } => run_notebook(action),
        Commands::Tag { action } => run_tag(action),
        Commands::Entry { action } => run_entry(action),
        Commands::Versions { entry } => {
            let (repo, ctx) = open()?;
            let versions = EntryService::new(repo).versions(&ctx, entry)?;
            print!("{}", terminate(cli::format_version_list(&versions, Utc::now())));
            Ok(())
        }
        Commands::Restore { entry, version } => {
            let (repo, ctx) = open()?;
            let snapshot = EntryService::new(repo).restore(&ctx, entry, version)?;
            match snapshot {
                Some(_) => println!(
                    "Restored entry {} to version {} (previous content saved)",
                    entry, version
                ),
                None => println!("Restored entry {} to version {}", entry, version),
            }
            Ok(())
        }
        Commands::Search { query } => {
            let (repo, ctx) = open()?;
            let found = EntryService::new(repo).search(&ctx, &query.join(" "))?;
            print!("{}", terminate(cli::format_entry_list(&found)));
            Ok(())
        }
        Commands::Mood { action } => run_mood(action),
        Commands::Export {
            entry,
            format,
            output,
        } => {
            let (repo, ctx) = open()?;
            let service = ExportService::new(repo);
            let document = match format {
                ExportFormat::Md => service.export_markdown(&ctx, entry)?,
                ExportFormat::Pdf => service.export_pdf(&ctx, entry)?,
            };

            if !output.exists() {
                fs::create_dir_all(&output)?;
            }
            let path = output.join(&document.filename);
            fs::write(&path, &document.body)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Compare {
            entry,
            from,
            to,
            output,
        } => {
            let (repo, ctx) = open()?;
            let service = CompareService::new(repo);
            let page = if to.eq_ignore_ascii_case("current") {
                service.compare_with_current(&ctx, entry, from)?
            } else {
                let to = to.parse::<u32>().map_err(|_| {
                    JournoError::InvalidArgument(format!(
                        "Invalid version: '{}'. Use a version number or 'current'",
                        to
                    ))
                })?;
                service.compare_versions(&ctx, entry, from, to)?
            };

            match output {
                Some(path) => {
                    fs::write(&path, page)?;
                    println!("{}", path.display());
                }
                None => print!("{}", page),
            }
            Ok(())
        }
    }
}

fn run_notebook(action: NotebookCommand) -> Result<()> {
    let (repo, ctx) = open()?;
    let service = NotebookService::new(repo);

    match action {
        NotebookCommand::New {
            name,
            description,
            color,
        } => {
            let id = service.create(
                &ctx,
                NewNotebook {
                    name,
                    description,
                    color,
                },
            )?;
            println!("Created notebook {}", id);
        }
        NotebookCommand::List { all } => {
            print!("{}", terminate(cli::format_notebook_list(&service.list(&ctx, all)?)));
        }
        NotebookCommand::Archive { id } => {
            service.archive(&ctx, id)?;
            println!("Archived notebook {}", id);
        }
        NotebookCommand::Unarchive { id } => {
            service.unarchive(&ctx, id)?;
            println!("Restored notebook {}", id);
        }
        NotebookCommand::Delete { id, cascade } => {
            if cascade {
                let removed = service.delete_cascade(&ctx, id)?;
                println!("Deleted notebook {} and {} entries", id, removed);
            } else {
                service.delete(&ctx, id)?;
                println!("Deleted notebook {}", id);
            }
        }
    }
    Ok(())
}

fn run_tag(action: TagCommand) -> Result<()> {
    let service = TagService::new(FileSystemRepository::discover()?);

    match action {
        TagCommand::New { name, color } => {
            let id = service.create(&name, color)?;
            println!("Created tag {}", id);
        }
        TagCommand::List { all } => {
            print!("{}", terminate(cli::format_tag_list(&service.list(all)?)));
        }
        TagCommand::Archive { tag } => {
            let detached = service.archive(service.resolve(&tag)?)?;
            println!("Archived tag '{}' (removed from {} entries)", tag, detached);
        }
        TagCommand::Unarchive { tag } => {
            service.unarchive(service.resolve(&tag)?)?;
            println!("Restored tag '{}'", tag);
        }
        TagCommand::Delete { tag } => {
            let detached = service.delete(service.resolve(&tag)?)?;
            println!("Deleted tag '{}' (removed from {} entries)", tag, detached);
        }
    }
    Ok(())
}

fn run_entry(action: EntryCommand) -> Result<()> {
    let (repo, ctx) = open()?;
    let tags = TagService::new(repo.clone());
    let service = EntryService::new(repo);

    match action {
        EntryCommand::New {
            title,
            notebook,
            date,
            mood,
            tags: tag_refs,
            content,
            favorite,
        } => {
            let new = NewEntry {
                title,
                content: read_content(content)?,
                notebook,
                tags: resolve_tags(&tags, &tag_refs)?,
                entry_date: match date {
                    Some(d) => parse_date(&d)?,
                    None => Local::now().date_naive(),
                },
                mood: mood.as_deref().map(parse_mood).transpose()?,
                favorite,
            };
            let id = service.create(&ctx, new)?;
            println!("Created entry {}", id);
        }
        EntryCommand::Edit { id, content, clear } => {
            let new_content = if clear {
                None
            } else if content.text.is_none() && content.html.is_none() && content.file.is_none() {
                return Err(JournoError::InvalidArgument(
                    "Provide new content with --text, --html or --file, or use --clear"
                        .to_string(),
                ));
            } else {
                read_content(content)?
            };

            match service.revise_content(&ctx, id, new_content)? {
                Some(_) => println!("Updated entry {} (previous content saved as a version)", id),
                None => println!("Updated entry {}", id),
            }
        }
        EntryCommand::Set {
            id,
            title,
            date,
            mood,
            no_mood,
            notebook,
            tags: tag_refs,
            no_tags,
        } => {
            let changes = EntryChanges {
                title,
                entry_date: date.as_deref().map(parse_date).transpose()?,
                mood: if no_mood {
                    Some(None)
                } else {
                    mood.as_deref().map(parse_mood).transpose()?.map(Some)
                },
                notebook,
                tags: if no_tags {
                    Some(Vec::new())
                } else if tag_refs.is_empty() {
                    None
                } else {
                    Some(resolve_tags(&tags, &tag_refs)?)
                },
            };
            service.update(&ctx, id, changes)?;
            println!("Updated entry {}", id);
        }
        EntryCommand::Show { id } => {
            print!("{}", cli::format_entry_details(&service.show(&ctx, id)?));
        }
        EntryCommand::List => {
            print!("{}", terminate(cli::format_entry_list(&service.list(&ctx)?)));
        }
        EntryCommand::Publish { id } => report_state(id, service.publish(&ctx, id)?),
        EntryCommand::Draft { id } => report_state(id, service.set_to_draft(&ctx, id)?),
        EntryCommand::Archive { id } => report_state(id, service.archive(&ctx, id)?),
        EntryCommand::Favorite { id } => {
            if service.toggle_favorite(&ctx, id)? {
                println!("Entry {} marked as favorite", id);
            } else {
                println!("Entry {} is no longer a favorite", id);
            }
        }
        EntryCommand::Duplicate { id } => {
            let copy = service.duplicate(&ctx, id)?;
            println!("Created entry {} as a copy of {}", copy, id);
        }
        EntryCommand::Delete { id } => {
            service.delete(&ctx, id)?;
            println!("Deleted entry {}", id);
        }
    }
    Ok(())
}

fn run_mood(action: MoodCommand) -> Result<()> {
    let (repo, ctx) = open()?;
    let service = MoodAnalyticsService::new(repo);

    match action {
        MoodCommand::Stats { period, json } => {
            let stats = service.get_mood_statistics(&ctx, period)?;
            emit(&stats, json, cli::format_mood_statistics)
        }
        MoodCommand::Timeline { days, json } => {
            let timeline = service.get_mood_timeline(&ctx, days)?;
            emit(&timeline, json, cli::format_mood_timeline)
        }
        MoodCommand::Calendar { year, month, json } => {
            let calendar = service.get_mood_calendar(&ctx, year, month)?;
            emit(&calendar, json, cli::format_mood_calendar)
        }
        MoodCommand::Correlations { json } => {
            let correlations = service.get_mood_correlations(&ctx)?;
            emit(&correlations, json, cli::format_mood_correlations)
        }
    }
}

/// Discover the journal and build the caller's context from its config
fn open() -> Result<(FileSystemRepository, UserContext)> {
    let repo = FileSystemRepository::discover()?;
    let ctx = UserContext::new(repo.load_config()?.get_user());
    Ok((repo, ctx))
}

fn emit<T: Serialize>(value: &T, json: bool, format: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", terminate(format(value)));
    }
    Ok(())
}

fn report_state(id: journo::domain::EntryId, state: journo::domain::EntryState) {
    println!("Entry {} is now {}", id, state);
}

fn terminate(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        JournoError::InvalidArgument(format!(
            "Invalid date format: '{}' (expected YYYY-MM-DD)",
            value
        ))
    })
}

fn parse_mood(value: &str) -> Result<Mood> {
    Mood::from_str(value).map_err(JournoError::InvalidArgument)
}

fn resolve_tags(service: &TagService, references: &[String]) -> Result<Vec<TagId>> {
    references.iter().map(|r| service.resolve(r)).collect()
}

/// Markdown (inline or from a file) becomes rich text; `--html` is stored as is
fn read_content(args: ContentArgs) -> Result<Option<String>> {
    let content = if let Some(text) = args.text {
        markdown_to_html(&text)
    } else if let Some(html) = args.html {
        html
    } else if let Some(path) = args.file {
        markdown_to_html(&fs::read_to_string(&path)?)
    } else {
        return Ok(None);
    };

    Ok(Some(content).filter(|c| !c.trim().is_empty()))
}
