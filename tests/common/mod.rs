//! Shared scripted test doubles for the interaction and fetch seams

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crafttui::{Catalog, Choice, CraftTuiError, Fetcher, InstallPlan, Result, SelectionUi};

/// Scripted [`SelectionUi`]: answers come from queues, everything shown is
/// recorded for assertions.
pub struct ScriptedUi {
    /// Answers for `choose_mod`, in order; exhausted queue answers Done.
    pub choices: VecDeque<Choice>,
    /// Answers for `choose_one`, in order; exhausted queue answers 0.
    pub picks: VecDeque<usize>,
    /// Answer for `confirm`.
    pub confirm_answer: bool,
    /// Every status line shown.
    pub statuses: Vec<String>,
    /// `(version_label, plan_names)` for every confirm prompt shown.
    pub confirms_shown: Vec<(String, Vec<String>)>,
    /// Filenames whose download progress was shown.
    pub downloads_shown: Vec<String>,
}

impl ScriptedUi {
    pub fn new(choices: Vec<Choice>, confirm_answer: bool) -> Self {
        Self {
            choices: choices.into(),
            picks: VecDeque::new(),
            confirm_answer,
            statuses: Vec::new(),
            confirms_shown: Vec::new(),
            downloads_shown: Vec::new(),
        }
    }

    pub fn status_containing(&self, needle: &str) -> bool {
        self.statuses.iter().any(|s| s.contains(needle))
    }
}

impl SelectionUi for ScriptedUi {
    fn choose_one(&mut self, _title: &str, _options: &[String]) -> Result<usize> {
        Ok(self.picks.pop_front().unwrap_or(0))
    }

    fn choose_mod(&mut self, _catalog: &Catalog) -> Result<Choice> {
        Ok(self.choices.pop_front().unwrap_or(Choice::Done))
    }

    fn confirm(&mut self, version_label: &str, plan: &InstallPlan) -> Result<bool> {
        let names = plan.names().iter().map(|n| n.to_string()).collect();
        self.confirms_shown.push((version_label.to_string(), names));
        Ok(self.confirm_answer)
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn download_begin(&mut self, filename: &str, _url: &str) {
        self.downloads_shown.push(filename.to_string());
    }

    fn download_progress(&mut self, _done: u64, _total: u64) {}

    fn download_finish(&mut self) {}
}

/// Scripted [`Fetcher`]: text responses come from a URL map, file
/// downloads write a fixed payload and are recorded in call order.
#[derive(Default)]
pub struct ScriptedFetcher {
    /// URL -> text body.
    pub texts: HashMap<String, String>,
    /// URLs whose file download should fail.
    pub failing: HashSet<String>,
    /// Payload written by every successful file download.
    pub payload: Vec<u8>,
    /// `(url, path)` for every `fetch_to_file` call, in order.
    pub files: RefCell<Vec<(String, PathBuf)>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            payload: b"payload".to_vec(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, url: &str, body: &str) -> Self {
        self.texts.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn downloaded_urls(&self) -> Vec<String> {
        self.files.borrow().iter().map(|(u, _)| u.clone()).collect()
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        self.texts
            .get(url)
            .cloned()
            .ok_or_else(|| CraftTuiError::fetch(format!("no scripted response for '{url}'")))
    }

    fn fetch_to_file(
        &self,
        url: &str,
        path: &Path,
        progress: &mut dyn FnMut(u64, u64),
    ) -> Result<()> {
        if self.failing.contains(url) {
            return Err(CraftTuiError::fetch(format!("scripted failure for '{url}'")));
        }
        std::fs::write(path, &self.payload)?;
        progress(self.payload.len() as u64, self.payload.len() as u64);
        self.files
            .borrow_mut()
            .push((url.to_string(), path.to_path_buf()));
        Ok(())
    }
}
