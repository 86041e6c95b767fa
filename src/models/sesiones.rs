use crate::schema::sesiones;
use chrono::NaiveDateTime;

#[derive(Queryable, Insertable)]
#[table_name = "sesiones"]
pub struct SesionData {
    pub token: String,
    pub uid: String,
    pub login_time: NaiveDateTime,
}
