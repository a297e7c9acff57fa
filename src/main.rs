use std::{env, process::exit, time::Duration};

use log::{error, info};
use spypoint_lib::{MediaQuery, SpypointApi};

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    dotenv::dotenv().ok();

    let username = match env::var("SPYPOINT_USERNAME") {
        Ok(u) => u,
        Err(_) => {
            error!("SPYPOINT_USERNAME is not set");
            exit(1);
        }
    };
    let password = match env::var("SPYPOINT_PASSWORD") {
        Ok(p) => p,
        Err(_) => {
            error!("SPYPOINT_PASSWORD is not set");
            exit(1);
        }
    };

    let http = match reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            error!("unable to build http client {}", e);
            exit(1);
        }
    };

    let api = SpypointApi::new(&username, &password, http);

    let cameras = match api.get_cameras().await {
        Ok(c) => c,
        Err(e) => {
            error!("unable to fetch cameras {}", e);
            exit(1);
        }
    };

    info!("account has {} cameras", cameras.len());
    for camera in &cameras {
        println!("{}", camera);
    }

    let query = MediaQuery::default().with_limit(25);
    let media = match api.get_media(&query).await {
        Ok(m) => m,
        Err(e) => {
            error!("unable to fetch media {}", e);
            exit(1);
        }
    };

    println!("{} recent photos", media.photos.len());
    for photo in &media.photos {
        if let Some(url) = &photo.large {
            println!("  {}", url);
        }
    }
}
