use clap::Subcommand;
use colored::Colorize;
use droplift_api::ApiClient;

use super::print_json;

#[derive(Subcommand)]
pub enum KeyCommands {
    /// List the account's public SSH keys
    List,
    /// Show one SSH key, including its public key material
    Show { id: String },
    /// Register a new public SSH key
    Add {
        /// Display name for the key
        #[arg(long)]
        name: String,
        /// Public key material (e.g. the contents of id_ed25519.pub)
        #[arg(long)]
        public_key: String,
    },
    /// Replace the public key material of an existing key
    Edit {
        id: String,
        /// New public key material
        #[arg(long)]
        public_key: String,
    },
    /// Delete an SSH key (irreversible; needs destroys enabled in settings)
    Destroy { id: String },
}

pub fn handle(client: &ApiClient, command: KeyCommands) -> anyhow::Result<()> {
    match command {
        KeyCommands::List => print_json(&client.list_ssh_keys()?),
        KeyCommands::Show { id } => print_json(&client.show_ssh_key(&id)?),
        KeyCommands::Add { name, public_key } => {
            print_json(&client.add_ssh_key(&name, &public_key)?)
        }
        KeyCommands::Edit { id, public_key } => {
            print_json(&client.edit_ssh_key(&id, &public_key)?)
        }
        KeyCommands::Destroy { id } => {
            let result = client.destroy_ssh_key(&id)?;
            println!("{}", format!("destroy requested for key {id}").yellow());
            print_json(&result)
        }
    }
}
