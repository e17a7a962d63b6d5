/// Maximum number of media references a report may carry
pub const MAX_IMAGE_REFS: usize = 5;

/// Buffer capacity of the report event broadcast channel
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;
