use anyhow::{Result, anyhow, bail};
use crossterm::terminal;
use std::io::{self, BufRead, Write};

use crate::{
    app::AppContext,
    cli::args::{Cli, Command},
    db::Db,
    domain::{
        idea::{IdeaDraft, IdeaId},
        validation::{self, FormErrors},
    },
    format, store, tui,
};

pub(crate) fn dispatch(app: &AppContext, cli: Cli) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match cli.command {
        Some(Command::Add { title, description }) => {
            let id = add_idea(app.db(), &title, &description)?;
            writeln!(stdout, "{}", id)?;
            Ok(())
        }
        Some(Command::List) => list_ideas(app.db(), "", terminal_width(), &mut stdout),
        Some(Command::Search { keyword }) => {
            list_ideas(app.db(), &keyword, terminal_width(), &mut stdout)
        }
        Some(Command::Edit {
            id,
            title,
            description,
        }) => edit_idea(
            app.db(),
            IdeaId::from(id),
            title.as_deref(),
            description.as_deref(),
        ),
        Some(Command::Delete { id, yes }) => {
            let stdin = io::stdin().lock();
            delete_idea(app.db(), IdeaId::from(id), yes, stdin, &mut stdout)
        }
        Some(Command::Version) => {
            writeln!(stdout, "ideas {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        None => {
            drop(stdout);
            tui::run_tui(app.db())
        }
    }
}

fn add_idea(db: &Db, title: &str, description: &str) -> Result<IdeaId> {
    let draft = validated(title, description)?;
    let mut list = store::open_list(db);
    let id = list.create(draft);
    store::persist_changes(db, &mut list);
    Ok(id)
}

fn list_ideas(db: &Db, keyword: &str, width: usize, out: &mut impl Write) -> Result<()> {
    let list = store::open_list(db);
    for idea in list.filter(keyword) {
        writeln!(out, "{}", format::format_idea_line(idea, width))?;
    }
    Ok(())
}

fn edit_idea(db: &Db, id: IdeaId, title: Option<&str>, description: Option<&str>) -> Result<()> {
    let mut list = store::open_list(db);
    let current = list
        .get(id)
        .ok_or_else(|| anyhow!("idea {} not found", id))?;
    let draft = validated(
        title.unwrap_or(&current.title),
        description.unwrap_or(&current.description),
    )?;
    list.update(id, draft);
    store::persist_changes(db, &mut list);
    Ok(())
}

fn delete_idea(
    db: &Db,
    id: IdeaId,
    confirmed: bool,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut list = store::open_list(db);
    let title = match list.get(id) {
        Some(idea) => idea.title.clone(),
        None => bail!("idea {} not found", id),
    };
    if !confirmed && !ask_confirmation(&tui::delete_prompt(&title), input, out)? {
        writeln!(out, "已取消")?;
        return Ok(());
    }
    list.remove(id);
    store::persist_changes(db, &mut list);
    Ok(())
}

fn ask_confirmation(prompt: &str, mut input: impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{} [y/N] ", prompt)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn validated(title: &str, description: &str) -> Result<IdeaDraft> {
    validation::validate(title, description).map_err(|errors: FormErrors| {
        anyhow!("{}", errors.messages().join("; "))
    })
}

fn terminal_width() -> usize {
    terminal::size()
        .map(|(width, _)| width as usize)
        .unwrap_or(80)
}
