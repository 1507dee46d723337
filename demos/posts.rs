use danbooru::{
    config::{Config, Site},
    posts::PostSearch,
    Client,
};
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // setting up logging.
    SimpleLogger::new().init()?;

    // Safebooru needs no account for reading.
    let client = Client::new(&Config::new(Site::Safebooru))?;

    let search = PostSearch {
        tags: Some("scenery".into()),
        limit: Some(3),
        ..PostSearch::default()
    };
    let posts = client.post_list(&search).await?;

    for post in posts.as_array().into_iter().flatten() {
        println!("#{} {}", post["id"], post["tag_string_general"]);
    }

    Ok(())
}
