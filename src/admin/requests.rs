use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub uid: String,
    pub email: String,
    pub nombre: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub uid: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuscarUsuariosRequest {
    pub login_token: String,
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub rol: Option<String>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerUsuarioRequest {
    pub login_token: String,
    pub uid: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificarUsuarioRequest {
    pub login_token: String,
    pub uid: String,
    pub email: Option<String>,
    pub nombre: Option<String>,
    pub rol: Option<String>,
    pub foto_perfil: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub tecnologias: Option<Vec<String>>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub sitio_web: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificarHorariosRequest {
    pub login_token: String,
    pub uid: String,
    pub horario_lunes: String,
    pub horario_martes: String,
    pub horario_miercoles: String,
    pub horario_jueves: String,
    pub horario_viernes: String,
    pub horario_sabado: String,
    pub horario_domingo: String,
    #[serde(default)]
    pub dias_generales: Option<Vec<String>>,
    #[serde(default)]
    pub hora_inicio: Option<String>,
    #[serde(default)]
    pub hora_fin: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloquearUsuarioRequest {
    pub login_token: String,
    pub uid: String,
    pub bloqueado: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliminarUsuarioRequest {
    pub login_token: String,
    pub uid: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuscarAsesoriasRequest {
    pub login_token: String,
    pub estado: Option<String>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliminarAsesoriaRequest {
    pub login_token: String,
    pub id: String,
}
