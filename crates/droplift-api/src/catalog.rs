//! Declarative catalog of API operations.
//!
//! Every operation is one [`OpSpec`]: the path template it dispatches to,
//! the call parameters it takes and whether it permanently deletes a
//! resource. Client methods are thin instantiations of this table; keeping
//! the catalog as data lets tests check it independently of any dispatch.

/// Descriptor for one API operation.
#[derive(Debug)]
pub struct OpSpec {
    /// Catalog identifier, `resource.action`.
    pub name: &'static str,
    /// Resource path template; `{id}` marks the identifier slot. The mixed
    /// trailing-slash pattern matches the provider's routes exactly and
    /// must not be normalized.
    pub path: &'static str,
    /// Required call parameters, in validation order. For operations that
    /// address a single resource, the identifier comes first.
    pub required: &'static [&'static str],
    /// Optional call parameters.
    pub optional: &'static [&'static str],
    /// Irreversible delete, gated behind the destroy-enabled flag.
    pub destructive: bool,
}

impl OpSpec {
    /// Render the resource path with the identifier substituted in.
    pub fn fill(&self, id: &str) -> String {
        self.path.replace("{id}", id)
    }

    pub fn takes_id(&self) -> bool {
        self.path.contains("{id}")
    }
}

const fn op(
    name: &'static str,
    path: &'static str,
    required: &'static [&'static str],
    optional: &'static [&'static str],
    destructive: bool,
) -> OpSpec {
    OpSpec {
        name,
        path,
        required,
        optional,
        destructive,
    }
}

// Droplets
pub const LIST_DROPLETS: OpSpec = op("droplets.list", "droplets", &[], &[], false);
pub const SHOW_DROPLET: OpSpec = op("droplets.show", "droplets/{id}", &["droplet_id"], &[], false);
pub const CREATE_DROPLET: OpSpec = op(
    "droplets.create",
    "droplets/new",
    &["name", "image_id", "region_id", "size_id"],
    &["ssh_key_ids"],
    false,
);
pub const REBOOT_DROPLET: OpSpec = op(
    "droplets.reboot",
    "droplets/{id}/reboot/",
    &["droplet_id"],
    &[],
    false,
);
pub const POWER_CYCLE_DROPLET: OpSpec = op(
    "droplets.power_cycle",
    "droplets/{id}/power_cycle/",
    &["droplet_id"],
    &[],
    false,
);
pub const SHUTDOWN_DROPLET: OpSpec = op(
    "droplets.shutdown",
    "droplets/{id}/shutdown/",
    &["droplet_id"],
    &[],
    false,
);
pub const POWER_OFF_DROPLET: OpSpec = op(
    "droplets.power_off",
    "droplets/{id}/power_off/",
    &["droplet_id"],
    &[],
    false,
);
pub const POWER_ON_DROPLET: OpSpec = op(
    "droplets.power_on",
    "droplets/{id}/power_on/",
    &["droplet_id"],
    &[],
    false,
);
pub const RESET_ROOT_PASSWORD: OpSpec = op(
    "droplets.reset_root_password",
    "droplets/{id}/reset_root_password/",
    &["droplet_id"],
    &[],
    false,
);
pub const RESIZE_DROPLET: OpSpec = op(
    "droplets.resize",
    "droplets/{id}/resize/",
    &["droplet_id", "size_id"],
    &[],
    false,
);
pub const SNAPSHOT_DROPLET: OpSpec = op(
    "droplets.snapshot",
    "droplets/{id}/snapshot/",
    &["droplet_id", "name"],
    &[],
    false,
);
pub const RESTORE_DROPLET: OpSpec = op(
    "droplets.restore",
    "droplets/{id}/restore/",
    &["droplet_id", "image_id"],
    &[],
    false,
);
pub const REBUILD_DROPLET: OpSpec = op(
    "droplets.rebuild",
    "droplets/{id}/rebuild/",
    &["droplet_id", "image_id"],
    &[],
    false,
);
pub const ENABLE_BACKUPS: OpSpec = op(
    "droplets.enable_backups",
    "droplets/{id}/enable_backups/",
    &["droplet_id"],
    &[],
    false,
);
pub const DISABLE_BACKUPS: OpSpec = op(
    "droplets.disable_backups",
    "droplets/{id}/disable_backups/",
    &["droplet_id"],
    &[],
    false,
);
pub const DESTROY_DROPLET: OpSpec = op(
    "droplets.destroy",
    "droplets/{id}/destroy/",
    &["droplet_id"],
    &[],
    true,
);

// Images
pub const LIST_IMAGES: OpSpec = op("images.list", "images/", &[], &[], false);
pub const SHOW_IMAGE: OpSpec = op("images.show", "images/{id}/", &["image_id"], &[], false);
pub const TRANSFER_IMAGE: OpSpec = op(
    "images.transfer",
    "images/{id}/transfer/",
    &["image_id", "region_id"],
    &[],
    false,
);
pub const DESTROY_IMAGE: OpSpec = op(
    "images.destroy",
    "images/{id}/destroy/",
    &["image_id"],
    &[],
    true,
);

// SSH keys
pub const LIST_SSH_KEYS: OpSpec = op("ssh_keys.list", "ssh_keys/", &[], &[], false);
pub const SHOW_SSH_KEY: OpSpec = op("ssh_keys.show", "ssh_keys/{id}/", &["key_id"], &[], false);
pub const ADD_SSH_KEY: OpSpec = op(
    "ssh_keys.add",
    "ssh_keys/new/",
    &["name", "ssh_pub_key"],
    &[],
    false,
);
pub const EDIT_SSH_KEY: OpSpec = op(
    "ssh_keys.edit",
    "ssh_keys/{id}/edit/",
    &["key_id", "ssh_pub_key"],
    &[],
    false,
);
pub const DESTROY_SSH_KEY: OpSpec = op(
    "ssh_keys.destroy",
    "ssh_keys/{id}/destroy/",
    &["key_id"],
    &[],
    true,
);

// Regions, sizes, documentation
pub const LIST_REGIONS: OpSpec = op("regions.list", "regions/", &[], &[], false);
pub const LIST_SIZES: OpSpec = op("sizes.list", "sizes/", &[], &[], false);
pub const DOCUMENTATION: OpSpec = op("documentation", "", &[], &[], false);

/// Every operation the client exposes, in catalog order.
pub static CATALOG: &[&OpSpec] = &[
    &LIST_DROPLETS,
    &SHOW_DROPLET,
    &CREATE_DROPLET,
    &REBOOT_DROPLET,
    &POWER_CYCLE_DROPLET,
    &SHUTDOWN_DROPLET,
    &POWER_OFF_DROPLET,
    &POWER_ON_DROPLET,
    &RESET_ROOT_PASSWORD,
    &RESIZE_DROPLET,
    &SNAPSHOT_DROPLET,
    &RESTORE_DROPLET,
    &REBUILD_DROPLET,
    &ENABLE_BACKUPS,
    &DISABLE_BACKUPS,
    &DESTROY_DROPLET,
    &LIST_IMAGES,
    &SHOW_IMAGE,
    &TRANSFER_IMAGE,
    &DESTROY_IMAGE,
    &LIST_SSH_KEYS,
    &SHOW_SSH_KEY,
    &ADD_SSH_KEY,
    &EDIT_SSH_KEY,
    &DESTROY_SSH_KEY,
    &LIST_REGIONS,
    &LIST_SIZES,
    &DOCUMENTATION,
];
