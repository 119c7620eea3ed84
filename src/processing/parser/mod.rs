pub mod channel_groups;
pub mod m3u;
