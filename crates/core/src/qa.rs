//! Q&A board: asking, answering and the role-scoped view of questions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    errors::{StudioError, StudioResult},
    models::{
        qa::{NewQuestion, QaItem},
        user::User,
    },
};

pub const ANSWERED_MESSAGE: &str = "Teacher answered your question!";

impl NewQuestion {
    pub fn validate(&self) -> StudioResult<()> {
        if self.question.trim().is_empty() {
            return Err(StudioError::Validation("Question is required".to_string()));
        }
        Ok(())
    }
}

/// Builds the stored item for a student's question. It starts unapproved.
pub fn ask(student: &User, new_question: NewQuestion, now: DateTime<Utc>) -> StudioResult<QaItem> {
    new_question.validate()?;
    Ok(QaItem {
        id: Uuid::new_v4(),
        student_id: student.id,
        student_name: student.name.clone(),
        question: new_question.question,
        answer: None,
        is_public: new_question.is_public,
        is_approved: false,
        category: new_question.category,
        timestamp: now,
    })
}

fn find_mut(items: &mut [QaItem], id: Uuid) -> StudioResult<&mut QaItem> {
    items
        .iter_mut()
        .find(|q| q.id == id)
        .ok_or_else(|| StudioError::NotFound(format!("Question {} not found", id)))
}

/// Stores the answer and approves the question.
pub fn answer(items: &mut [QaItem], id: Uuid, answer: String) -> StudioResult<QaItem> {
    if answer.trim().is_empty() {
        return Err(StudioError::Validation("Answer is required".to_string()));
    }
    let item = find_mut(items, id)?;
    item.answer = Some(answer);
    item.is_approved = true;
    Ok(item.clone())
}

pub fn set_visibility(
    items: &mut [QaItem],
    id: Uuid,
    is_public: bool,
    is_approved: bool,
) -> StudioResult<QaItem> {
    let item = find_mut(items, id)?;
    item.is_public = is_public;
    item.is_approved = is_approved;
    Ok(item.clone())
}

pub fn delete(items: &mut Vec<QaItem>, id: Uuid) -> StudioResult<()> {
    let before = items.len();
    items.retain(|q| q.id != id);
    if items.len() == before {
        return Err(StudioError::NotFound(format!("Question {} not found", id)));
    }
    Ok(())
}

fn newest_first(mut items: Vec<QaItem>) -> Vec<QaItem> {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items
}

/// Questions everyone can read: public and approved.
pub fn public_wall(items: &[QaItem]) -> Vec<QaItem> {
    newest_first(
        items
            .iter()
            .filter(|q| q.is_public && q.is_approved)
            .cloned()
            .collect(),
    )
}

pub fn own_items(student_id: Uuid, items: &[QaItem]) -> Vec<QaItem> {
    newest_first(
        items
            .iter()
            .filter(|q| q.student_id == student_id)
            .cloned()
            .collect(),
    )
}

/// Teachers see the whole board; students see the public wall plus their own questions.
pub fn visible_to(viewer: &User, items: &[QaItem]) -> Vec<QaItem> {
    if viewer.is_teacher() {
        return newest_first(items.to_vec());
    }
    newest_first(
        items
            .iter()
            .filter(|q| (q.is_public && q.is_approved) || q.student_id == viewer.id)
            .cloned()
            .collect(),
    )
}
