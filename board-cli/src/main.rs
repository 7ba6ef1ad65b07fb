use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, anyhow};
use board_client::controllers::admin::NO_FILES_DELETED_MESSAGE;
use board_client::controllers::{
    CleanupController, DeletedFiles, DetailController, EditorController, ListingController,
    ListingState, NavButton,
};
use board_client::{BoardApi, HttpClient, MarkdownEditor, RenderedContent, Route};
use clap::{Parser, Subcommand};
use tracing::debug;

mod logging;
mod settings;
mod terminal;

use logging::init_logging;
use settings::Settings;
use terminal::{
    BrowseCommand, TerminalInteraction, parse_browse_command, read_content, read_image, read_line,
};

#[derive(Debug, Parser)]
#[command(name = "board-cli", version, about = "CLI клиент для доски объявлений")]
struct Cli {
    /// Адрес backend (по умолчанию BOARD_API_BASE_URL или http://localhost:9090).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Размер страницы списка (не меньше 1).
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Страница списка постов; с `--keyword` выполняется поиск.
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value = "")]
        keyword: String,
    },
    /// Интерактивный просмотр списка с блочной пагинацией.
    Browse {
        #[arg(long, default_value = "")]
        keyword: String,
    },
    /// Просмотр поста.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание поста.
    Create {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        writer: String,
        /// Содержимое в markdown.
        #[arg(long)]
        content: Option<String>,
        /// Файл с содержимым в markdown (важнее `--content`).
        #[arg(long)]
        file: Option<PathBuf>,
        /// Изображение для вставки в конец поста (можно повторять).
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Обновление поста.
    ///
    /// Не указанные поля сохраняют текущие значения поста.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        writer: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Удаление поста (с подтверждением).
    Delete {
        #[arg(long)]
        id: i64,
        /// Не спрашивать подтверждение.
        #[arg(long)]
        yes: bool,
    },
    /// Загрузка изображения; печатает его URL.
    UploadImage {
        #[arg(long)]
        file: PathBuf,
    },
    /// Удаление изображений, на которые не ссылается ни один пост.
    CleanupImages {
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::from_env()?.with_overrides(cli.server, cli.page_size);
    init_logging(&settings.log_level)?;
    debug!(base_url = %settings.base_url, page_size = settings.page_size, "board-cli started");

    let config = settings.client_config();
    let page_size = config.page_size;
    let html_policy = config.html_policy;
    let client = HttpClient::new(config).context("не удалось создать HTTP-клиент")?;

    match cli.command {
        Command::List { page, keyword } => {
            let mut listing = ListingController::new(&client, page_size);
            listing.load(page, &keyword).await;
            ensure_ok(listing.state().error())?;
            print_listing(listing.state());
        }
        Command::Browse { keyword } => browse(&client, page_size, keyword).await?,
        Command::Get { id } => {
            let interaction = TerminalInteraction::new(false);
            let mut detail = DetailController::new(&client, &interaction, id, html_policy);
            detail.load().await;
            ensure_ok(detail.state().error())?;
            print_detail(&detail);
        }
        Command::Create {
            title,
            writer,
            content,
            file,
            images,
        } => {
            let interaction = TerminalInteraction::new(true);
            let mut editor = MarkdownEditor::new();
            if let Some(markdown) = read_content(content, file.as_deref())? {
                editor.set_markdown(markdown);
            }

            let mut form = EditorController::for_create(&client, &interaction);
            form.state_mut().set_title(title);
            form.state_mut().set_writer(writer);
            attach_images(&mut form, &mut editor, &images).await?;

            let route = form
                .submit(&editor)
                .await
                .ok_or_else(|| anyhow!("пост не создан"))?;
            println!("Далее: {route}");
        }
        Command::Update {
            id,
            title,
            writer,
            content,
            file,
            images,
        } => {
            let interaction = TerminalInteraction::new(true);
            let mut editor = MarkdownEditor::new();
            let mut form = EditorController::for_update(&client, &interaction, id);
            if form.load(&mut editor).await.is_some() {
                return Err(anyhow!("пост {id} недоступен для редактирования"));
            }

            if let Some(title) = title {
                form.state_mut().set_title(title);
            }
            if let Some(writer) = writer {
                form.state_mut().set_writer(writer);
            }
            if let Some(markdown) = read_content(content, file.as_deref())? {
                editor.set_markdown(markdown);
            }
            attach_images(&mut form, &mut editor, &images).await?;

            let route = form
                .submit(&editor)
                .await
                .ok_or_else(|| anyhow!("пост не обновлён"))?;
            println!("Далее: {route}");
        }
        Command::Delete { id, yes } => {
            let interaction = TerminalInteraction::new(yes);
            let mut detail = DetailController::new(&client, &interaction, id, html_policy);
            detail.load().await;
            ensure_ok(detail.state().error())?;

            match detail.delete().await {
                Some(route) => println!("Пост удалён: id={id}. Далее: {route}"),
                None if interaction.declined() => println!("Удаление отменено"),
                None => return Err(anyhow!("пост {id} не удалён")),
            }
        }
        Command::UploadImage { file } => {
            let image = read_image(&file)?;
            let uploaded = client
                .upload_image(&image)
                .await
                .context("не удалось загрузить изображение")?;
            println!("{}", uploaded.url);
        }
        Command::CleanupImages { yes } => {
            let interaction = TerminalInteraction::new(yes);
            let mut cleanup = CleanupController::new(&client, &interaction);
            cleanup.run_cleanup().await;
            if interaction.declined() {
                println!("Очистка отменена");
                return Ok(());
            }
            ensure_ok(cleanup.state().error())?;
            print_cleanup(&cleanup);
        }
    }

    Ok(())
}

fn ensure_ok(error: Option<&str>) -> Result<()> {
    match error {
        Some(message) => Err(anyhow!(message.to_string())),
        None => Ok(()),
    }
}

async fn attach_images<A: BoardApi + ?Sized>(
    form: &mut EditorController<'_, A>,
    editor: &mut MarkdownEditor,
    images: &[PathBuf],
) -> Result<()> {
    for path in images {
        let image = read_image(path)?;
        if form.insert_image(editor, image).await.is_none() {
            return Err(anyhow!("изображение {} не загружено", path.display()));
        }
    }
    Ok(())
}

async fn browse(client: &HttpClient, page_size: u32, keyword: String) -> Result<()> {
    let mut listing = ListingController::new(client, page_size);
    listing.set_keyword_input(keyword);
    listing.search().await;

    loop {
        if let Some(error) = listing.state().error() {
            eprintln!("{error}");
        }
        print_listing(listing.state());
        println!("[p] пред. [n] след. [<] пред. блок [>] след. блок, номер страницы, /поиск, #id, [q] выход");

        let Some(line) = read_line() else {
            return Ok(());
        };
        let nav = listing.state().navigation();
        match parse_browse_command(&line) {
            BrowseCommand::PrevPage => follow(&mut listing, nav.prev_page).await,
            BrowseCommand::NextPage => follow(&mut listing, nav.next_page).await,
            BrowseCommand::PrevBlock => follow(&mut listing, nav.prev_block).await,
            BrowseCommand::NextBlock => follow(&mut listing, nav.next_block).await,
            BrowseCommand::Page(number) => {
                if !listing.move_page(i64::from(number) - 1).await {
                    println!("Нет такой страницы");
                }
            }
            BrowseCommand::Search(keyword) => {
                listing.set_keyword_input(keyword);
                listing.search().await;
            }
            BrowseCommand::Open(id) => {
                println!("Откройте пост: board-cli get --id {id} ({})", Route::PostDetail(id));
            }
            BrowseCommand::Quit => return Ok(()),
            BrowseCommand::Unknown => println!("Неизвестная команда"),
        }
    }
}

async fn follow<A: BoardApi + ?Sized>(listing: &mut ListingController<'_, A>, button: NavButton) {
    if !button.enabled {
        println!("Переход недоступен");
        return;
    }
    listing.move_page(button.target).await;
}

fn print_listing(state: &ListingState) {
    if !state.keyword().is_empty() {
        println!("Поиск: {}", state.keyword());
    }

    if state.is_empty() {
        println!("Постов нет.");
    }
    for row in state.rows() {
        println!("- [{}] {} ({}, {})", row.id, row.title, row.writer, row.created_at);
    }

    let buttons: Vec<String> = state
        .page_buttons()
        .iter()
        .map(|button| {
            if button.current {
                format!("[{}]", button.number)
            } else {
                button.number.to_string()
            }
        })
        .collect();
    println!("Страница {} | {}", state.page_info(), buttons.join(" "));
}

fn print_detail<A: BoardApi + ?Sized>(detail: &DetailController<'_, A>) {
    let state = detail.state();
    let (Some(post), Some(meta)) = (state.post(), state.meta()) else {
        return;
    };

    println!("{}", post.title);
    println!("Автор: {} · Создан: {}", meta.writer, meta.created_at);
    if let Some(updated_at) = meta.updated_at {
        println!("Изменён: {updated_at}");
    }
    println!();
    match state.rendered_content() {
        Some(RenderedContent::Html(html)) => println!("{html}"),
        Some(RenderedContent::Text(text)) => println!("{text}"),
        None => {}
    }
    println!();
    println!("Редактировать: {}", detail.edit());
}

fn print_cleanup<A: BoardApi + ?Sized>(cleanup: &CleanupController<'_, A>) {
    let Some(summary) = cleanup.state().summary() else {
        return;
    };

    println!("Всего файлов изображений: {}", summary.total_image_file_count);
    println!("Используется постами: {}", summary.referenced_image_count);
    println!("Неиспользуемых: {}", summary.orphan_image_count);
    match summary.deleted {
        DeletedFiles::Nothing => println!("{NO_FILES_DELETED_MESSAGE}"),
        DeletedFiles::Files(names) => {
            println!("Удалённые файлы:");
            for name in names {
                println!("  {name}");
            }
        }
    }
}
