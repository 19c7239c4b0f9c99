use clap::Subcommand;
use colored::Colorize;
use droplift_api::{ApiClient, NewDroplet};

use super::print_json;

#[derive(Subcommand)]
pub enum DropletCommands {
    /// List all active droplets
    List,
    /// Show one droplet
    Show { id: String },
    /// Provision a new droplet
    Create {
        /// Hostname for the new droplet
        #[arg(long)]
        name: String,
        /// Image ID to provision from
        #[arg(long)]
        image: String,
        /// Region ID to provision in
        #[arg(long)]
        region: String,
        /// Size ID for the new droplet
        #[arg(long)]
        size: String,
        /// Comma-separated SSH key IDs to install
        #[arg(long)]
        ssh_keys: Option<String>,
    },
    /// Reboot a droplet
    Reboot { id: String },
    /// Power cycle a droplet (off, then back on)
    PowerCycle { id: String },
    /// Cleanly shut a droplet down
    Shutdown { id: String },
    /// Power a droplet off
    PowerOff { id: String },
    /// Power a droplet on
    PowerOn { id: String },
    /// Reset the root password (reboots the droplet)
    ResetRootPassword { id: String },
    /// Resize a droplet to a different size
    Resize {
        id: String,
        /// Target size ID
        #[arg(long)]
        size: String,
    },
    /// Take a named snapshot
    Snapshot {
        id: String,
        /// Name for the snapshot
        #[arg(long)]
        name: String,
    },
    /// Restore from an image or snapshot
    Restore {
        id: String,
        /// Image ID to restore from
        #[arg(long)]
        image: String,
    },
    /// Rebuild from a default image, keeping the IP address
    Rebuild {
        id: String,
        /// Image ID to rebuild from
        #[arg(long)]
        image: String,
    },
    /// Enable daily automatic backups
    EnableBackups { id: String },
    /// Disable automatic backups
    DisableBackups { id: String },
    /// Destroy a droplet (irreversible; needs destroys enabled in settings)
    Destroy { id: String },
}

pub fn handle(client: &ApiClient, command: DropletCommands) -> anyhow::Result<()> {
    match command {
        DropletCommands::List => print_json(&client.list_droplets()?),
        DropletCommands::Show { id } => print_json(&client.show_droplet(&id)?),
        DropletCommands::Create {
            name,
            image,
            region,
            size,
            ssh_keys,
        } => {
            let created = client.create_droplet(&NewDroplet {
                name,
                image_id: image,
                region_id: region,
                size_id: size,
                ssh_key_ids: ssh_keys,
            })?;
            println!("{}", "droplet requested".green());
            print_json(&created)
        }
        DropletCommands::Reboot { id } => print_json(&client.reboot_droplet(&id)?),
        DropletCommands::PowerCycle { id } => print_json(&client.power_cycle_droplet(&id)?),
        DropletCommands::Shutdown { id } => print_json(&client.shutdown_droplet(&id)?),
        DropletCommands::PowerOff { id } => print_json(&client.power_off_droplet(&id)?),
        DropletCommands::PowerOn { id } => print_json(&client.power_on_droplet(&id)?),
        DropletCommands::ResetRootPassword { id } => {
            print_json(&client.reset_root_password(&id)?)
        }
        DropletCommands::Resize { id, size } => print_json(&client.resize_droplet(&id, &size)?),
        DropletCommands::Snapshot { id, name } => {
            print_json(&client.snapshot_droplet(&id, &name)?)
        }
        DropletCommands::Restore { id, image } => {
            print_json(&client.restore_droplet(&id, &image)?)
        }
        DropletCommands::Rebuild { id, image } => {
            print_json(&client.rebuild_droplet(&id, &image)?)
        }
        DropletCommands::EnableBackups { id } => print_json(&client.enable_backups(&id)?),
        DropletCommands::DisableBackups { id } => print_json(&client.disable_backups(&id)?),
        DropletCommands::Destroy { id } => {
            let result = client.destroy_droplet(&id)?;
            println!("{}", format!("destroy requested for droplet {id}").yellow());
            print_json(&result)
        }
    }
}
