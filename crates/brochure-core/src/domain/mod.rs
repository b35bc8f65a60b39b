//! Domain model (records, preferences, uploads, ids, events, errors).

pub mod errors;
pub mod events;
pub mod file;
pub mod ids;
pub mod preferences;
pub mod record;
pub mod upload;

pub use self::errors::{ErrorKind, StorageError};
pub use self::events::{DomainEvent, StorageAction};
pub use self::file::FileDescriptor;
pub use self::ids::{SessionId, UploadId};
pub use self::preferences::{BodyAttributes, FontSize, PreferencesPatch, Theme, UserPreferences};
pub use self::record::{DEFAULT_VERSION, StoredRecord};
pub use self::upload::{UploadState, UploadTask};
