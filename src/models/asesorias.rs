use crate::schema::asesorias;
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct AsesoriaData {
    pub id: String,
    pub id_programador: String,
    pub id_usuario: String,
    pub nombre_usuario: String,
    pub email_usuario: String,
    pub fecha_solicitud: NaiveDateTime,
    pub fecha_asesoria: String,
    pub hora_asesoria: String,
    pub motivo: Option<String>,
    pub estado: String,
    pub mensaje_respuesta: Option<String>,
    pub motivo_cancelacion: Option<String>,
    pub fecha_cancelacion: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[table_name = "asesorias"]
pub struct NewAsesoria {
    pub id: String,
    pub id_programador: String,
    pub id_usuario: String,
    pub nombre_usuario: String,
    pub email_usuario: String,
    pub fecha_solicitud: NaiveDateTime,
    pub fecha_asesoria: String,
    pub hora_asesoria: String,
    pub motivo: Option<String>,
    pub estado: String,
}

pub const ESTADO_PENDIENTE: &str = "pendiente";
pub const ESTADO_APROBADA: &str = "aprobada";
pub const ESTADO_RECHAZADA: &str = "rechazada";
pub const ESTADO_CANCELADA: &str = "cancelada";
