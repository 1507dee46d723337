use danbooru::{
    comments::{CommentListing, CommentSearch},
    config::Config,
    Client,
};
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().init()?;

    // The grouping mode comes from the command line, so it is parsed and
    // rejected here if it is neither `comment` nor `post`.
    let mode = std::env::args().nth(1).unwrap_or_else(|| "comment".into());
    let search = CommentSearch {
        body_matches: Some("cats".into()),
        ..CommentSearch::default()
    };
    let listing = CommentListing::from_mode(&mode, search, Some("cat".into()))?;

    let client = Client::new(&Config::default())?;
    let comments = client.comment_list(&listing).await?;
    println!("{comments:#}");

    Ok(())
}
