use crate::schema::shows;
use chrono::offset::Utc;
use chrono::DateTime;

#[derive(Queryable, Debug, serde::Serialize)]
#[diesel(table_name = shows)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub rating: f64,
    pub status: String,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = shows)]
pub struct NewShow<'a> {
    pub title: &'a str,
    pub genre: &'a str,
    pub rating: f64,
    pub status: &'a str,
    pub user_id: Option<i32>,
    pub updated_at: DateTime<Utc>,
}
