use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::bridge::PersistenceBridge;
use crate::io::config_io;
use crate::io::storage::FileStore;
use crate::model::ids::{ListId, TaskId};
use crate::model::task::{DraftUpdate, Task};
use crate::session::Session;
use crate::store::Action;

type CliResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CliResult {
    let json = cli.json;
    let mut session = open_session(&cli)?;

    match cli.command {
        Commands::Lists => cmd_lists(&session, json),
        Commands::New(args) => cmd_new(&mut session, args, json),
        Commands::Drop(args) => cmd_drop(&mut session, args, json),
        Commands::Show(args) => cmd_show(&mut session, args, json),
        Commands::Add(args) => cmd_add(&mut session, args, json),
        Commands::Edit(args) => cmd_edit(&mut session, args, json),
        Commands::Toggle(args) => cmd_toggle(&mut session, args, json),
        Commands::Rm(args) => cmd_rm(&mut session, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_session(cli: &Cli) -> Result<Session<FileStore>, Box<dyn std::error::Error>> {
    let config = config_io::read_config(cli.config.as_deref())?;
    let data_dir = config_io::resolve_data_dir(&config, cli.data_dir.as_deref());
    let storage = FileStore::new(data_dir);
    // Reject a bad key before anything is loaded
    storage.path_for(&config.storage.key)?;
    let bridge = PersistenceBridge::with_key(storage, config.storage.key.clone());
    Ok(Session::open(bridge).with_view(config.view.filter, config.view.order))
}

/// Resolve a list reference: a list id, else an exact (trimmed) name
fn resolve_list(session: &Session<FileStore>, reference: &str) -> Result<ListId, String> {
    let snapshot = session.store().snapshot();
    if let Ok(id) = reference.parse::<ListId>()
        && snapshot.list(id).is_some()
    {
        return Ok(id);
    }
    snapshot
        .list_named(reference.trim())
        .map(|l| l.id)
        .ok_or_else(|| format!("list not found: {}", reference))
}

fn require_task<'a>(
    session: &'a Session<FileStore>,
    list: ListId,
    task: TaskId,
) -> Result<&'a Task, String> {
    session
        .store()
        .snapshot()
        .task(list, task)
        .ok_or_else(|| format!("task {} not found in list {}", task, list))
}

fn print_task(session: &Session<FileStore>, list: ListId, task: TaskId, json: bool) -> CliResult {
    let task = require_task(session, list, task)?;
    if json {
        let out = TaskChangedJson { list, task };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", task_line(task, 0));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_lists(session: &Session<FileStore>, json: bool) -> CliResult {
    let snapshot = session.store().snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&list_summaries(snapshot))?);
    } else {
        print!("{}", render_lists(snapshot));
    }
    Ok(())
}

fn cmd_show(session: &mut Session<FileStore>, args: ShowArgs, json: bool) -> CliResult {
    let list = resolve_list(session, &args.list)?;
    session.apply(Action::SelectTaskList { list })?;
    if let Some(filter) = args.filter {
        session.apply(Action::SetFilter(filter))?;
    }

    let store = session.store();
    let filter = store.selection().filter;
    let tasks = store.visible_tasks();
    let task_list = store
        .snapshot()
        .list(list)
        .ok_or_else(|| format!("list not found: {}", args.list))?;

    if json {
        let out = ShowJson {
            id: task_list.id,
            name: &task_list.name,
            filter,
            tasks,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render_tasks(task_list, filter, &tasks));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_new(session: &mut Session<FileStore>, args: NewArgs, json: bool) -> CliResult {
    let transition = session.apply(Action::AddTaskList { name: args.name })?;
    if !transition.lists_changed {
        return Err("list name must not be empty".into());
    }
    let list = session
        .store()
        .snapshot()
        .lists()
        .last()
        .ok_or("list was not created")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&CreatedJson { id: list.id.0 })?);
    } else {
        println!("{}", list.id);
    }
    Ok(())
}

fn cmd_drop(session: &mut Session<FileStore>, args: DropArgs, json: bool) -> CliResult {
    let list = resolve_list(session, &args.list)?;
    session.apply(Action::DeleteTaskList { list })?;
    if session.store().snapshot().is_empty() {
        // The guard never writes an empty collection, so storage still
        // holds the last list.
        eprintln!("warning: last list removed; storage keeps it until another list exists");
    }
    if json {
        let out = DeletedJson { list, task: None };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("deleted list {}", list);
    }
    Ok(())
}

fn cmd_add(session: &mut Session<FileStore>, args: AddArgs, json: bool) -> CliResult {
    let list = resolve_list(session, &args.list)?;
    let transition = session.apply(Action::AddTask {
        list,
        text: args.text,
        due_date: args.due,
    })?;
    if !transition.lists_changed {
        return Err("task text must not be empty".into());
    }
    let task = session
        .store()
        .snapshot()
        .list(list)
        .and_then(|l| l.tasks.last())
        .ok_or("task was not created")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&CreatedJson { id: task.id.0 })?);
    } else {
        println!("{}", task.id);
    }
    Ok(())
}

fn cmd_edit(session: &mut Session<FileStore>, args: EditArgs, json: bool) -> CliResult {
    let list = resolve_list(session, &args.list)?;
    require_task(session, list, args.task)?;

    let update = DraftUpdate {
        text: args.text,
        due_date: if args.clear_due {
            Some(None)
        } else {
            args.due.map(Some)
        },
    };
    if update.is_empty() {
        return Err("nothing to change: pass --text, --due or --clear-due".into());
    }

    let task = args.task;
    session.apply(Action::BeginEdit { list, task })?;
    session.apply(Action::UpdateDraft { list, task, update })?;
    session.apply(Action::CommitEdit { list, task })?;

    if require_task(session, list, task)?.is_editing() {
        session.apply(Action::CancelEdit { list, task })?;
        return Err("task text must not be empty".into());
    }
    print_task(session, list, task, json)
}

fn cmd_toggle(session: &mut Session<FileStore>, args: TaskRef, json: bool) -> CliResult {
    let list = resolve_list(session, &args.list)?;
    require_task(session, list, args.task)?;
    session.apply(Action::ToggleCompletion {
        list,
        task: args.task,
    })?;
    print_task(session, list, args.task, json)
}

fn cmd_rm(session: &mut Session<FileStore>, args: TaskRef, json: bool) -> CliResult {
    let list = resolve_list(session, &args.list)?;
    require_task(session, list, args.task)?;
    session.apply(Action::DeleteTask {
        list,
        task: args.task,
    })?;
    if json {
        let out = DeletedJson {
            list,
            task: Some(args.task),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("deleted task {}", args.task);
    }
    Ok(())
}

