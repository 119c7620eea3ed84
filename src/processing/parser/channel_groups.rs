use indexmap::IndexMap;

use crate::model::ChannelGroupConfig;
use crate::utils::CONSTANTS;

const GROUP_END: &str = "}";

/// Parses the channel list grammar:
///
/// ```text
/// Entertainment: {
///     Star Plus,
///     Sony TV
/// }
/// ```
///
/// Malformed input never fails: lines outside a group are skipped and a group
/// header inside an open group simply switches the current group.
pub fn parse_channel_groups<'a, I>(lines: I) -> ChannelGroupConfig
where
    I: Iterator<Item=&'a str>,
{
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut current_group: Option<String> = None;

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = CONSTANTS.re_group_header.captures(line) {
            let group = caps[1].trim().to_string();
            groups.insert(group.clone(), vec![]);
            current_group = Some(group);
            continue;
        }
        if line == GROUP_END && current_group.is_some() {
            current_group = None;
            continue;
        }
        if let Some(group) = current_group.as_ref() {
            let channel = line.trim_end_matches(',').trim();
            if !channel.is_empty() {
                if let Some(channels) = groups.get_mut(group) {
                    channels.push(channel.to_string());
                }
            }
        }
    }

    ChannelGroupConfig { groups }
}

#[inline]
pub fn parse_channel_groups_text(text: &str) -> ChannelGroupConfig {
    parse_channel_groups(text.lines())
}

#[cfg(test)]
mod tests {
    use crate::processing::parser::channel_groups::parse_channel_groups_text;

    #[test]
    fn test_parse_groups_in_file_order() {
        let text = "
  Entertainment : {
    Star Plus,
    Sony TV,

    Colors
  }

Movies: {
Star Gold,,
}
";
        let cfg = parse_channel_groups_text(text);
        let groups: Vec<&str> = cfg.groups.keys().map(String::as_str).collect();
        assert_eq!(groups, vec!["Entertainment", "Movies"]);
        assert_eq!(cfg.groups["Entertainment"], vec!["Star Plus", "Sony TV", "Colors"]);
        assert_eq!(cfg.groups["Movies"], vec!["Star Gold"]);
    }

    #[test]
    fn test_lines_outside_groups_are_ignored() {
        let text = "Star Plus\n}\nNews: {\nABC News\n}\nSony TV\n";
        let cfg = parse_channel_groups_text(text);
        assert_eq!(cfg.groups.len(), 1);
        assert_eq!(cfg.groups["News"], vec!["ABC News"]);
    }

    #[test]
    fn test_unclosed_group_switches_context() {
        let text = "News: {\nABC News\nSports: {\nStar Sports 1\n}\n";
        let cfg = parse_channel_groups_text(text);
        assert_eq!(cfg.groups["News"], vec!["ABC News"]);
        assert_eq!(cfg.groups["Sports"], vec!["Star Sports 1"]);
    }

    #[test]
    fn test_repeated_group_restarts_list() {
        let text = "News: {\nABC News\n}\nSports: {\nESPN\n}\nNews: {\nCNN\n}\n";
        let cfg = parse_channel_groups_text(text);
        let groups: Vec<&str> = cfg.groups.keys().map(String::as_str).collect();
        assert_eq!(groups, vec!["News", "Sports"]);
        assert_eq!(cfg.groups["News"], vec!["CNN"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_channel_groups_text("").groups.is_empty());
    }
}
