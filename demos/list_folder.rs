use drive_adapter::{AccessToken, DriveAdapterFactory, DriveConfig, FileEntry, Options};

#[tokio::main]
async fn main() {
    let token = std::env::var("DRIVE_ACCESS_TOKEN").unwrap();
    let adapter =
        DriveAdapterFactory::with_token(DriveConfig::from_env(), AccessToken::bearer(token))
            .unwrap();

    // "root" is the alias the drive API accepts for the top-level folder
    let root = FileEntry::directory("/").with_id("root");
    let entries = adapter.list(&root, &Options::new()).await.unwrap();

    for entry in entries {
        println!("{:?} {}", entry.size(), entry.path);
    }
}
