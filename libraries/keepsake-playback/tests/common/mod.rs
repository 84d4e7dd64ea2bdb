//! Shared test doubles: a scripted media element and a fake DOM page

#![allow(dead_code)]

use keepsake_playback::{MediaElement, Page, PlayRejection, Result};
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

// ===== Media =====

/// Media element whose readiness and play outcomes are scripted
#[derive(Default)]
pub struct ScriptedMedia {
    pub url: String,
    pub looping: bool,
    pub volume: f64,
    pub time: f64,
    pub playing: bool,
    pub seeks: Vec<f64>,
    pub starts: usize,
    pub pauses: usize,

    /// Number of `is_ready` calls answered "not ready" before becoming ready
    pub not_ready_polls: u32,
    pub ready_checks: Cell<u32>,

    /// Outcomes handed out by `start`, `Ok` once exhausted
    pub outcomes: VecDeque<std::result::Result<(), PlayRejection>>,
}

impl ScriptedMedia {
    pub fn open(url: &str) -> Result<Self> {
        Ok(Self {
            url: url.to_string(),
            ..Self::default()
        })
    }

    pub fn ready_after(mut self, polls: u32) -> Self {
        self.not_ready_polls = polls;
        self
    }

    pub fn rejecting(mut self, rejection: PlayRejection) -> Self {
        self.outcomes.push_back(Err(rejection));
        self
    }

    /// Advance the playhead as if audio had been playing
    pub fn advance(&mut self, secs: f64) {
        self.time += secs;
    }
}

impl MediaElement for ScriptedMedia {
    type Pending = std::result::Result<(), PlayRejection>;

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn seek(&mut self, position_secs: f64) {
        self.time = position_secs;
        self.seeks.push(position_secs);
    }

    fn is_ready(&self) -> bool {
        let checks = self.ready_checks.get();
        self.ready_checks.set(checks + 1);
        checks >= self.not_ready_polls
    }

    fn start(&mut self) -> Self::Pending {
        self.starts += 1;
        let outcome = self.outcomes.pop_front().unwrap_or(Ok(()));
        self.playing = outcome.is_ok();
        outcome
    }

    fn pause(&mut self) {
        self.pauses += 1;
        self.playing = false;
    }
}

// ===== Page =====

pub struct FakeNode {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub html: String,
    pub parent: Option<usize>,
    pub handlers: Vec<Rc<dyn Fn()>>,
}

/// Tiny in-memory DOM; node 0 is the body
pub struct FakePage {
    pub nodes: Vec<FakeNode>,
    has_body: bool,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            nodes: vec![FakeNode {
                tag: "body".to_string(),
                id: None,
                classes: Vec::new(),
                html: String::new(),
                parent: None,
                handlers: Vec::new(),
            }],
            has_body: true,
        }
    }

    pub fn without_body() -> Self {
        let mut page = Self::new();
        page.has_body = false;
        page
    }

    /// Page with a `ul.navbar-nav` under the body
    pub fn with_navbar() -> Self {
        let mut page = Self::new();
        let nav = page.create_element("ul").unwrap();
        page.set_attribute(&nav, "class", "navbar-nav").unwrap();
        page.append_child(&0, &nav).unwrap();
        page
    }

    fn attached(&self, index: usize) -> bool {
        self.within(index, 0)
    }

    /// Whether `index` is `root` or one of its descendants
    fn within(&self, mut index: usize, root: usize) -> bool {
        loop {
            if index == root {
                return true;
            }
            match self.nodes[index].parent {
                Some(parent) => index = parent,
                None => return false,
            }
        }
    }

    fn matches(&self, index: usize, selector: &str) -> bool {
        let node = &self.nodes[index];
        if let Some(class) = selector.strip_prefix('.') {
            node.classes.iter().any(|c| c == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            node.id.as_deref() == Some(id)
        } else {
            node.tag == selector
        }
    }

    pub fn count(&self, selector: &str) -> usize {
        self.query_all(selector).len()
    }

    pub fn html_of(&self, selector: &str) -> Option<String> {
        self.query(selector).map(|i| self.nodes[i].html.clone())
    }

    /// Activation handlers still held by any node
    pub fn live_handlers(&self) -> usize {
        self.nodes.iter().map(|node| node.handlers.len()).sum()
    }

    /// Handler of the first matching node, cloned so no borrow is held while it runs
    pub fn handler(&self, selector: &str) -> Option<Rc<dyn Fn()>> {
        let index = self.query(selector)?;
        self.nodes[index].handlers.first().cloned()
    }
}

impl Page for FakePage {
    type Node = usize;

    fn query_all(&self, selector: &str) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.attached(i) && self.matches(i, selector))
            .collect()
    }

    fn body(&self) -> Option<usize> {
        self.has_body.then_some(0)
    }

    fn create_element(&mut self, tag: &str) -> Result<usize> {
        self.nodes.push(FakeNode {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            html: String::new(),
            parent: None,
            handlers: Vec::new(),
        });
        Ok(self.nodes.len() - 1)
    }

    fn set_attribute(&mut self, node: &usize, name: &str, value: &str) -> Result<()> {
        let node = &mut self.nodes[*node];
        match name {
            "id" => node.id = Some(value.to_string()),
            "class" => node.classes = value.split_whitespace().map(str::to_string).collect(),
            _ => {}
        }
        Ok(())
    }

    fn set_inner_html(&mut self, node: &usize, html: &str) {
        self.nodes[*node].html = html.to_string();
    }

    fn append_child(&mut self, parent: &usize, child: &usize) -> Result<()> {
        self.nodes[*child].parent = Some(*parent);
        Ok(())
    }

    fn remove(&mut self, node: &usize) {
        let subtree: Vec<usize> = (0..self.nodes.len())
            .filter(|&i| self.within(i, *node))
            .collect();
        for index in subtree {
            self.nodes[index].handlers.clear();
        }
        self.nodes[*node].parent = None;
    }

    fn on_activate(&mut self, node: &usize, handler: Rc<dyn Fn()>) -> Result<()> {
        self.nodes[*node].handlers.push(handler);
        Ok(())
    }
}
