use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

/// Last-modified tokens of feed resources, keyed by resource name
pub struct ModifiedTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ModifiedTokenRepository<'a, C> {
    /// Creates a new instance of [`ModifiedTokenRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get the token stored for `resource`, `None` if the resource was never fetched
    pub async fn get(&self, resource: &str) -> Result<Option<String>, DbErr> {
        let token = entity::prelude::ModifiedToken::find()
            .filter(entity::modified_token::Column::Resource.eq(resource))
            .one(self.db)
            .await?;

        Ok(token.map(|t| t.token))
    }

    /// Store the token for `resource`, inserting on first use and updating afterwards
    pub async fn set(
        &self,
        resource: &str,
        token: &str,
    ) -> Result<entity::modified_token::Model, DbErr> {
        let modified_token = entity::modified_token::ActiveModel {
            resource: ActiveValue::Set(resource.to_string()),
            token: ActiveValue::Set(token.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::ModifiedToken::insert(modified_token)
            .on_conflict(
                OnConflict::column(entity::modified_token::Column::Resource)
                    .update_columns([
                        entity::modified_token::Column::Token,
                        entity::modified_token::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }
}
