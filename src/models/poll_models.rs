use serde::{Serialize, Deserialize};
use mongodb::bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::vote_models::Vote;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<PollOption>,
    pub is_active: bool,
    pub created_by: ObjectId,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PollOption {
    pub id: String,
    pub text: String,
    pub votes: u32,
}

/// Which polls a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollFilter {
    All,
    Active,
    Closed,
}

impl PollFilter {
    pub fn matches(self, poll: &Poll) -> bool {
        match self {
            PollFilter::All => true,
            PollFilter::Active => poll.is_active,
            PollFilter::Closed => !poll.is_active,
        }
    }
}

pub fn new_option_id() -> String {
    format!("opt_{}", ObjectId::new().to_hex())
}

/// Trims option texts, drops blanks, and requires at least two
/// case-insensitively distinct entries.
pub fn normalize_option_texts(options: &[String]) -> AppResult<Vec<String>> {
    let trimmed: Vec<String> = options
        .iter()
        .map(|opt| opt.trim().to_string())
        .filter(|opt| !opt.is_empty())
        .collect();

    if trimmed.len() < 2 {
        return Err(AppError::ValidationError(
            "Title and at least 2 options required".to_string(),
        ));
    }

    let mut seen: Vec<String> = Vec::with_capacity(trimmed.len());
    for option in &trimmed {
        let key = option.to_lowercase();
        if seen.contains(&key) {
            return Err(AppError::ValidationError(format!(
                "Duplicate option: {}",
                option
            )));
        }
        seen.push(key);
    }

    Ok(trimmed)
}

pub fn normalize_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::ValidationError(
            "Title and at least 2 options required".to_string(),
        ));
    }
    Ok(title.to_string())
}

impl Poll {
    pub fn new(
        title: String,
        description: Option<String>,
        option_texts: Vec<String>,
        created_by: ObjectId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            title,
            description,
            options: option_texts
                .into_iter()
                .map(|text| PollOption {
                    id: new_option_id(),
                    text,
                    votes: 0,
                })
                .collect(),
            is_active: true,
            created_by,
            closed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn option(&self, option_id: &str) -> Option<&PollOption> {
        self.options.iter().find(|opt| opt.id == option_id)
    }

    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|opt| opt.votes as u64).sum()
    }

    /// Builds a replacement option list for `new_texts`.
    ///
    /// A text equal (ignoring case) to an existing option keeps that
    /// option's id. Counters are recomputed from `votes`; votes pointing at
    /// ids absent from the result are not counted.
    pub fn remap_options(&self, new_texts: &[String], votes: &[Vote]) -> Vec<PollOption> {
        let mut options: Vec<PollOption> = new_texts
            .iter()
            .map(|text| {
                let existing = self
                    .options
                    .iter()
                    .find(|opt| opt.text.to_lowercase() == text.to_lowercase());
                PollOption {
                    id: existing.map(|opt| opt.id.clone()).unwrap_or_else(new_option_id),
                    text: text.clone(),
                    votes: 0,
                }
            })
            .collect();

        let mut counts: HashMap<&str, u32> = HashMap::new();
        for vote in votes {
            *counts.entry(vote.option_id.as_str()).or_default() += 1;
        }
        for option in &mut options {
            option.votes = counts.get(option.id.as_str()).copied().unwrap_or(0);
        }

        options
    }
}
