use crate::schema::notificaciones;
use chrono::NaiveDateTime;

// Bandeja de salida: el despachador externo (correo/WhatsApp) la drena por
// su cuenta; el servidor solo registra filas dentro de la misma
// transacción que muta la asesoría.
#[derive(Insertable)]
#[table_name = "notificaciones"]
pub struct NewNotificacion {
    pub id_asesoria: String,
    pub destinatario: String,
    pub asunto: String,
    pub mensaje: String,
    pub tipo: String,
    pub estado_asesoria: String,
    pub creado_en: NaiveDateTime,
}

pub const TIPO_EMAIL: &str = "email";
