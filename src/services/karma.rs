use crate::entities::{prelude::*, users};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

/// Points credited for a successful upload (and reclaimed on deletion).
pub const UPLOAD_REWARD: i32 = 10;
/// Points charged for each recorded download.
pub const DOWNLOAD_COST: i32 = 1;

/// The karma balance has exactly three mutation paths, each atomic with its
/// triggering event. Every method takes any `ConnectionTrait` so callers can
/// run it inside the transaction wrapping that event.
pub struct KarmaLedger;

impl KarmaLedger {
    /// +10 on successful upload.
    pub async fn credit_upload<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<(), DbErr> {
        Users::update_many()
            .col_expr(
                users::Column::KarmaPoints,
                Expr::col(users::Column::KarmaPoints).add(UPLOAD_REWARD),
            )
            .filter(users::Column::Id.eq(user_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// -1 on a recorded download. Not clamped: the `balance >= 1`
    /// precondition checked before recording is the sole gate.
    pub async fn debit_download<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<(), DbErr> {
        Users::update_many()
            .col_expr(
                users::Column::KarmaPoints,
                Expr::col(users::Column::KarmaPoints).sub(DOWNLOAD_COST),
            )
            .filter(users::Column::Id.eq(user_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// -10 on deletion of an owned document, floored at 0. This debit alone
    /// never pushes a balance negative.
    pub async fn debit_delete<C: ConnectionTrait>(conn: &C, user_id: &str) -> Result<(), DbErr> {
        let floored = Expr::case(
            Expr::col(users::Column::KarmaPoints).gte(UPLOAD_REWARD),
            Expr::col(users::Column::KarmaPoints).sub(UPLOAD_REWARD),
        )
        .finally(Expr::value(0));

        Users::update_many()
            .col_expr(users::Column::KarmaPoints, floored.into())
            .filter(users::Column::Id.eq(user_id))
            .exec(conn)
            .await?;
        Ok(())
    }
}
