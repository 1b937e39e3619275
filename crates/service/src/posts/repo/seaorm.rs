use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, NotSet, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

use models::post::{self, PostField};

use crate::posts::domain::{NewPost, Post};
use crate::posts::filter::{Filter, FilterValue, PostQuery, SortOrder};
use crate::posts::repository::{PostRepository, RepoError};

pub struct SeaOrmPostRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPostRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn map_db_err(e: DbErr) -> RepoError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepoError::UniqueViolation(detail),
        _ => RepoError::Backend(e.to_string()),
    }
}

fn utc(ts: DateTimeWithTimeZone) -> DateTime<Utc> { ts.with_timezone(&Utc) }

impl From<post::Model> for Post {
    fn from(m: post::Model) -> Self {
        Post {
            id: m.id,
            title: m.title,
            slug: m.slug,
            body: m.body,
            excerpt: m.excerpt,
            author: m.author,
            featured_image: m.featured_image,
            tags: m.tags,
            published: m.published,
            published_at: m.published_at.map(utc),
            created_at: utc(m.created_at),
            updated_at: utc(m.updated_at),
        }
    }
}

/// Translate the predicate tree into a sea-orm condition.
pub fn condition(filter: &Filter) -> Condition {
    match filter {
        Filter::And(parts) => parts.iter().fold(Condition::all(), |c, f| c.add(condition(f))),
        Filter::Or(parts) => parts.iter().fold(Condition::any(), |c, f| c.add(condition(f))),
        Filter::Eq(field, FilterValue::Bool(b)) => Condition::all().add(field.column().eq(*b)),
        Filter::Eq(field, FilterValue::Text(s)) => Condition::all().add(field.column().eq(s.clone())),
        Filter::Contains(field, s) => Condition::all().add(
            Expr::col((post::Entity, field.column()))
                .like(LikeExpr::new(format!("%{}%", escape_like(s))).escape('\\')),
        ),
    }
}

/// Escape LIKE metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn order(o: SortOrder) -> Order {
    match o {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

#[async_trait::async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let res = post::Entity::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;
        Ok(res.map(Post::from))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let res = post::Entity::find()
            .filter(post::Column::Slug.eq(slug.to_string()))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(res.map(Post::from))
    }

    async fn insert(&self, new: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now().into();
        let am = post::ActiveModel {
            id: NotSet,
            title: Set(new.title),
            slug: Set(new.slug),
            body: Set(new.body),
            excerpt: Set(new.excerpt),
            author: Set(new.author),
            featured_image: Set(new.featured_image),
            tags: Set(new.tags),
            published: Set(new.published),
            published_at: Set(new.published_at.map(Into::into)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(&self.db).await.map_err(map_db_err)?;
        Ok(created.into())
    }

    async fn update(&self, p: Post) -> Result<Option<Post>, RepoError> {
        let Some(found) = post::Entity::find_by_id(p.id).one(&self.db).await.map_err(map_db_err)? else {
            return Ok(None);
        };
        let mut am: post::ActiveModel = found.into();
        am.title = Set(p.title);
        am.slug = Set(p.slug);
        am.body = Set(p.body);
        am.excerpt = Set(p.excerpt);
        am.author = Set(p.author);
        am.featured_image = Set(p.featured_image);
        am.tags = Set(p.tags);
        am.published = Set(p.published);
        am.published_at = Set(p.published_at.map(Into::into));
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await.map_err(map_db_err)?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let res = post::Entity::delete_by_id(id).exec(&self.db).await.map_err(map_db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError> {
        let select = post::Entity::find().filter(condition(&query.filter));
        let total = select.clone().count(&self.db).await.map_err(map_db_err)?;
        let dir = order(query.sort.order);
        let rows = select
            .order_by(query.sort.field.column(), dir.clone())
            .order_by(PostField::Id.column(), dir)
            .offset(query.offset())
            .limit(query.limit())
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok((rows.into_iter().map(Post::from).collect(), total))
    }
}
