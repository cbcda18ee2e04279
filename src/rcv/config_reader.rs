use crate::rcv::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_juridiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
}

/// The contest description written at the top of a summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
}

impl OutputConfig {
    pub fn from_settings(settings: &OutputSettings) -> OutputConfig {
        OutputConfig {
            contest: settings.contest_name.clone(),
            date: settings.contest_date.clone(),
            jurisdiction: settings.contest_juridiction.clone(),
            office: settings.contest_office.clone(),
        }
    }

    /// Without a configuration, the contest is named after the votes file.
    pub fn from_votes_path(path: &str) -> OutputConfig {
        let contest = Path::new(path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(path)
            .to_string();
        OutputConfig {
            contest,
            date: None,
            jurisdiction: None,
            office: None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RcvConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    /// Relative to the directory of the configuration file.
    #[serde(rename = "votesFile")]
    pub votes_file: Option<String>,
    #[serde(rename = "logLevel")]
    pub log_level: Option<u8>,
}

pub fn read_config(path: &str) -> RcvResult<RcvConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu {})
}

pub fn read_summary(path: &str) -> RcvResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let c: RcvConfig =
            serde_json::from_str(r#"{"outputSettings": {"contestName": "Mayor"}}"#).unwrap();
        assert_eq!(c.output_settings.contest_name, "Mayor");
        assert_eq!(c.votes_file, None);
        assert_eq!(c.log_level, None);
    }

    #[test]
    fn contest_named_after_votes_file() {
        let o = OutputConfig::from_votes_path("data/election-2021.txt");
        assert_eq!(o.contest, "election-2021.txt");
        assert_eq!(o.date, None);
    }
}
