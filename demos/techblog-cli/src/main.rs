use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use techblog::prelude::*;
use techblog::protocol::join_tag_names;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Command-line client for the Techblog API.
#[derive(Debug, Parser)]
#[command(name = "techblog-cli", version)]
struct Cli {
    /// File holding the login token between runs.
    #[arg(
        long,
        env = "TECHBLOG_SESSION",
        default_value = ".techblog-session.json",
        global = true
    )]
    session: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Log in and remember the token.
    Login { email: String, password: String },
    /// Forget the stored token.
    Logout,
    /// Show whether a token is stored.
    Status,
    /// List articles, optionally filtered. `--search` wins over `--tag`.
    Articles {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show one article with its comments.
    Show { id: u64 },
    /// List all tags.
    Tags,
    /// Publish a new article.
    New(ArticleArgs),
    /// Replace an article's title, content, image and tags.
    Edit {
        id: u64,
        #[command(flatten)]
        article: ArticleArgs,
    },
    /// Delete an article.
    Delete { id: u64 },
    /// Comment on an article.
    Comment {
        id: u64,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Debug, PartialEq, Args)]
struct ArticleArgs {
    title: String,
    content: String,
    /// Comma-separated tag names.
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    image: Option<String>,
}

impl ArticleArgs {
    fn to_input(&self) -> ArticleInput {
        let mut input = ArticleInput::new(&self.title, &self.content);
        if let Some(tags) = &self.tags {
            input = input.tags_from_str(tags);
        }
        if let Some(url) = &self.image {
            input = input.image_url(url);
        }
        input
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_article_line(article: &Article) {
    let edit = if article.can_edit { " [editable]" } else { "" };
    println!(
        "#{:<4} {}  ({}, {}){}",
        article.id.0,
        article.title,
        article.author_or_unknown(),
        article.primary_tag(),
        edit
    );
    println!("      {}...", article.excerpt(120).replace('\n', " "));
}

fn print_detail(detail: &ArticleDetail) {
    let a = &detail.article;
    println!("{}", a.title);
    println!("by {}", a.author_or_unknown());
    if let Some(created) = a.created_at {
        println!("{}", created.format("%d %B %Y"));
    }
    if !a.tags.is_empty() {
        println!("tags: {}", join_tag_names(&a.tags));
    }
    if let Some(url) = a.image_url.as_deref().filter(|u| !u.is_empty()) {
        println!("image: {url}");
    }
    println!("\n{}\n", a.content);
    println!("comments ({})", detail.comments.len());
    if detail.comments.is_empty() {
        println!("  no comments yet");
    }
    for c in &detail.comments {
        println!(
            "  {}: {}",
            c.author_name.as_deref().unwrap_or("anonymous"),
            c.content
        );
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

async fn run(cli: Cli) -> Result<(), TechblogError> {
    let client = BlogClientBuilder::new()
        .config(GatewayConfig::from_env())
        .on_auth_failure(|f: &AuthFailure| {
            eprintln!(
                "session expired (HTTP {} on {}), run `techblog-cli login` again",
                f.status, f.endpoint
            );
        })
        .build(FileSessionStore::new(cli.session))?;

    match cli.command {
        Command::Login { email, password } => {
            client.login(&email, &password).await?;
            println!("logged in");
        }
        Command::Logout => {
            client.logout();
            println!("logged out");
        }
        Command::Status => println!("{}", client.session_state()),
        Command::Articles { search, tag } => {
            let filter = ArticleFilter::from_parts(search.as_deref(), tag.as_deref());
            let listing = client.listing(&filter).await?;
            if !listing.tags.is_empty() {
                println!("tags: {}\n", join_tag_names(&listing.tags));
            }
            if listing.articles.is_empty() {
                println!("no articles match");
            }
            for article in &listing.articles {
                print_article_line(article);
            }
        }
        Command::Show { id } => {
            print_detail(&client.article_with_comments(ArticleId(id)).await?)
        }
        Command::Tags => {
            for tag in client.list_tags().await? {
                println!("{}", tag.name);
            }
        }
        Command::New(article) => {
            let created = client.create_article(&article.to_input()).await?;
            println!("created article #{}", created.id);
        }
        Command::Edit { id, article } => {
            client.update_article(ArticleId(id), &article.to_input()).await?;
            println!("updated article #{id}");
        }
        Command::Delete { id } => {
            client.delete_article(ArticleId(id)).await?;
            println!("deleted article #{id}");
        }
        Command::Comment { id, text } => {
            client
                .post_comment(ArticleId(id), &CommentInput::new(text.join(" ")))
                .await?;
            println!("comment posted");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    techblog::logging::init_with("warn");

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
