table! {
    asesorias (id) {
        id -> Char,
        id_programador -> Char,
        id_usuario -> Char,
        nombre_usuario -> Char,
        email_usuario -> Char,
        fecha_solicitud -> Datetime,
        fecha_asesoria -> Char,
        hora_asesoria -> Char,
        motivo -> Nullable<Varchar>,
        estado -> Char,
        mensaje_respuesta -> Nullable<Varchar>,
        motivo_cancelacion -> Nullable<Varchar>,
        fecha_cancelacion -> Nullable<Datetime>,
    }
}

table! {
    horarios (uid) {
        uid -> Char,
        lunes -> Char,
        martes -> Char,
        miercoles -> Char,
        jueves -> Char,
        viernes -> Char,
        sabado -> Char,
        domingo -> Char,
        dias_generales -> Nullable<Varchar>,
        hora_inicio -> Nullable<Char>,
        hora_fin -> Nullable<Char>,
    }
}

table! {
    notificaciones (nid) {
        nid -> Unsigned<Bigint>,
        id_asesoria -> Char,
        destinatario -> Char,
        asunto -> Varchar,
        mensaje -> Varchar,
        tipo -> Char,
        estado_asesoria -> Char,
        creado_en -> Datetime,
    }
}

table! {
    proyectos (id) {
        id -> Char,
        id_programador -> Char,
        nombre -> Char,
        descripcion -> Varchar,
        tipo -> Char,
        participacion -> Char,
        tecnologias -> Varchar,
        repo_url -> Nullable<Varchar>,
        demo_url -> Nullable<Varchar>,
        imagen_url -> Nullable<Varchar>,
    }
}

table! {
    sesiones (token, uid, login_time) {
        token -> Char,
        uid -> Char,
        login_time -> Datetime,
    }
}

table! {
    usuarios (uid) {
        uid -> Char,
        email -> Char,
        nombre -> Char,
        password -> Char,
        rol -> Char,
        foto_perfil -> Varchar,
        especialidad -> Varchar,
        descripcion -> Varchar,
        tecnologias -> Varchar,
        linkedin -> Varchar,
        github -> Varchar,
        twitter -> Varchar,
        sitio_web -> Varchar,
        bloqueado -> Bool,
    }
}

allow_tables_to_appear_in_same_query!(
    asesorias,
    horarios,
    notificaciones,
    proyectos,
    sesiones,
    usuarios,
);
