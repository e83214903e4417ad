// Collaborators the grid toolbar talks to
pub mod downloads;
pub mod permissions;
pub mod rows_client;

pub use downloads::{DirectoryDownloads, DownloadSink};
pub use permissions::{rows_editable, PermissionAction, PermissionCheck, RolePermissions};
pub use rows_client::{GrpcRowsClient, RowsQuery, TableRowsApi};
