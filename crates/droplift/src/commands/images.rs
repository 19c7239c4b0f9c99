use clap::Subcommand;
use colored::Colorize;
use droplift_api::ApiClient;

use super::print_json;

#[derive(Subcommand)]
pub enum ImageCommands {
    /// List public images plus the account's snapshots and backups
    List,
    /// Show one image
    Show { id: String },
    /// Copy an image to another region
    Transfer {
        id: String,
        /// Target region ID
        #[arg(long)]
        region: String,
    },
    /// Destroy an image (irreversible; needs destroys enabled in settings)
    Destroy { id: String },
}

pub fn handle(client: &ApiClient, command: ImageCommands) -> anyhow::Result<()> {
    match command {
        ImageCommands::List => print_json(&client.list_images()?),
        ImageCommands::Show { id } => print_json(&client.show_image(&id)?),
        ImageCommands::Transfer { id, region } => {
            print_json(&client.transfer_image(&id, &region)?)
        }
        ImageCommands::Destroy { id } => {
            let result = client.destroy_image(&id)?;
            println!("{}", format!("destroy requested for image {id}").yellow());
            print_json(&result)
        }
    }
}
