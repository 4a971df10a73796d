use std::io::{self, BufRead, Write};
use std::sync::Arc;

use dailytasks::app::App;
use dailytasks::auth::{LoginRequest, RecoveryRequest, RegisterRequest};
use dailytasks::config::Config;
use dailytasks::error::AppError;
use dailytasks::models::TaskInput;
use dailytasks::storage::FileStore;
use uuid::Uuid;

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Resolves a 1-based position in the current list to a task id.
fn task_at(app: &mut App, arg: &str) -> Result<Option<Uuid>, AppError> {
    let index: usize = match arg.parse() {
        Ok(n) if n >= 1 => n,
        _ => return Ok(None),
    };
    Ok(app
        .tasks()?
        .current_list()
        .tasks
        .get(index - 1)
        .map(|task| task.id))
}

fn show_tasks(app: &mut App) -> Result<(), AppError> {
    let service = app.tasks()?;
    let list = service.current_list();
    println!("-- {} --", list.name);
    for (i, task) in list.tasks.iter().enumerate() {
        let mark = if task.completed { "x" } else { " " };
        let emoji = task.emoji.as_deref().unwrap_or("");
        println!("{:>3}. [{}] {} {} ({})", i + 1, mark, emoji, task.name, task.date);
    }
    let progress = service.progress();
    println!(
        "{}/{} done ({:.0}%) — {}",
        progress.completed, progress.total, progress.percentage, progress.message
    );
    Ok(())
}

fn show_lists(app: &mut App) -> Result<(), AppError> {
    let current = app.tasks()?.current_list_id().to_string();
    for list in app.tasks()?.lists() {
        let marker = if list.id == current { "*" } else { " " };
        println!("{} {} [{}] ({} tasks)", marker, list.name, list.id, list.tasks.len());
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  register | login | logout | recover | whoami");
    println!("  tasks | add <name> | toggle <n> | edit <n> <name> | delete <n>");
    println!("  lists | newlist <name> | renamelist <id> <name> | dellist <id> | switch <id>");
    println!("  help | quit");
}

async fn dispatch(app: &mut App, line: &str) -> Result<(), AppError> {
    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    match command {
        "register" => {
            let request = RegisterRequest {
                name: prompt("name")?,
                email: prompt("email")?,
                password: prompt("password")?,
                confirm_password: prompt("confirm password")?,
            };
            let profile = app.on_register(&request).await?;
            println!("Account created for {}. You can now log in.", profile.email);
        }
        "login" => {
            let request = LoginRequest {
                email: prompt("email")?,
                password: prompt("password")?,
            };
            let session = app.on_login(&request).await?;
            println!(
                "Welcome back, {}! Session valid until {}.",
                session.user.name, session.expires_at
            );
        }
        "logout" => {
            app.on_logout()?;
            println!("Logged out.");
        }
        "recover" => {
            let request = RecoveryRequest {
                email: prompt("email")?,
            };
            println!("{}", app.on_recover(&request).await?);
        }
        "whoami" => match app.tasks() {
            Ok(service) => println!("{} <{}>", service.user().name, service.user().email),
            Err(_) => println!("Not logged in."),
        },
        "tasks" => show_tasks(app)?,
        "add" => {
            app.tasks()?.add_task(TaskInput {
                name: rest.to_string(),
                date: None,
                emoji: None,
            })?;
            show_tasks(app)?;
        }
        "toggle" => {
            if let Some(id) = task_at(app, rest)? {
                app.tasks()?.toggle_task(id)?;
            }
            show_tasks(app)?;
        }
        "edit" => {
            let mut args = rest.splitn(2, ' ');
            let position = args.next().unwrap_or("");
            let name = args.next().unwrap_or("").to_string();
            if let Some(id) = task_at(app, position)? {
                app.tasks()?.edit_task(
                    id,
                    TaskInput {
                        name,
                        date: None,
                        emoji: None,
                    },
                )?;
            }
            show_tasks(app)?;
        }
        "delete" => {
            if let Some(id) = task_at(app, rest)? {
                let confirm = prompt("delete this task? (y/n)")?;
                if confirm == "y" {
                    app.tasks()?.delete_task(id)?;
                }
            }
            show_tasks(app)?;
        }
        "lists" => show_lists(app)?,
        "newlist" => {
            let id = app.tasks()?.create_list(rest)?;
            println!("Created list {}.", id);
        }
        "renamelist" => {
            let mut args = rest.splitn(2, ' ');
            let id = args.next().unwrap_or("").to_string();
            let name = args.next().unwrap_or("");
            app.tasks()?.rename_list(&id, name)?;
            show_lists(app)?;
        }
        "dellist" => {
            app.tasks()?.delete_list(rest)?;
            show_lists(app)?;
        }
        "switch" => {
            app.tasks()?.switch_list(rest);
            show_tasks(app)?;
        }
        "help" => print_help(),
        "" => {}
        other => println!("Unknown command '{}'. Try 'help'.", other),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let store = Arc::new(FileStore::open(&config.data_file)?);
    let mut app = App::new(store, &config);

    match app.resume()? {
        Some(profile) => println!("Welcome back, {}!", profile.name),
        None => println!("Daily Tasks — type 'register' or 'login' to begin, 'help' for commands."),
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line == "quit" || line == "exit" {
            break;
        }
        // Failures are inline messages; prior state is left unchanged.
        if let Err(error) = dispatch(&mut app, line).await {
            println!("{}", error);
        }
    }

    Ok(())
}
