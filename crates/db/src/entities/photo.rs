//! Photo entity.
//!
//! Comments are sub-entities of their photo: they live in the photo row's
//! `comments` JSONB column as an ordered, append-only array and have no
//! lifecycle of their own.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owner user ID, immutable after creation
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Server-generated file name under the images directory
    pub file_name: String,

    /// Upload timestamp
    pub date_time: DateTimeWithTimeZone,

    /// Ordered sequence of [`Comment`] sub-documents
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: Json,
}

/// A comment embedded in a photo's `comments` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment ID (ULID, assigned at append time).
    pub id: String,
    /// Comment text.
    pub comment: String,
    /// Server-assigned timestamp.
    pub date_time: DateTimeWithTimeZone,
    /// Author user ID. A weak reference: the author may no longer resolve
    /// at read time.
    pub user_id: String,
}

impl Model {
    /// Decode the `comments` column into typed sub-documents.
    ///
    /// A malformed array degrades to empty rather than failing the read.
    #[must_use]
    pub fn comment_list(&self) -> Vec<Comment> {
        serde_json::from_value(self.comments.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
