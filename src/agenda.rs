//! Disponibilidad semanal y reglas de agendamiento y cancelación.
//!
//! Todas las funciones de este módulo son puras: reciben instantáneas
//! (horario, estado de la asesoría, hora actual) y devuelven una decisión
//! sin tocar la base de datos ni guardar estado entre llamadas.

use anyhow::Context;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use std::fmt;

use crate::models::asesorias::{
    ESTADO_APROBADA, ESTADO_CANCELADA, ESTADO_PENDIENTE, ESTADO_RECHAZADA,
};

pub const HORA_INICIO_DEFECTO: &str = "09:00";
pub const HORA_FIN_DEFECTO: &str = "18:00";

const HORAS_MINIMAS_CANCELACION: i64 = 24;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dia {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl Dia {
    pub const TODOS: [Dia; 7] = [
        Dia::Lunes,
        Dia::Martes,
        Dia::Miercoles,
        Dia::Jueves,
        Dia::Viernes,
        Dia::Sabado,
        Dia::Domingo,
    ];

    pub fn nombre(self) -> &'static str {
        match self {
            Dia::Lunes => "Lunes",
            Dia::Martes => "Martes",
            Dia::Miercoles => "Miércoles",
            Dia::Jueves => "Jueves",
            Dia::Viernes => "Viernes",
            Dia::Sabado => "Sábado",
            Dia::Domingo => "Domingo",
        }
    }

    // Acepta la forma acentuada y la forma plana; los datos antiguos
    // traen ambas.
    pub fn desde_nombre(nombre: &str) -> Option<Dia> {
        match nombre.trim() {
            "Lunes" => Some(Dia::Lunes),
            "Martes" => Some(Dia::Martes),
            "Miércoles" | "Miercoles" => Some(Dia::Miercoles),
            "Jueves" => Some(Dia::Jueves),
            "Viernes" => Some(Dia::Viernes),
            "Sábado" | "Sabado" => Some(Dia::Sabado),
            "Domingo" => Some(Dia::Domingo),
            _ => None,
        }
    }

    pub fn desde_fecha(fecha: NaiveDate) -> Dia {
        match fecha.weekday() {
            Weekday::Mon => Dia::Lunes,
            Weekday::Tue => Dia::Martes,
            Weekday::Wed => Dia::Miercoles,
            Weekday::Thu => Dia::Jueves,
            Weekday::Fri => Dia::Viernes,
            Weekday::Sat => Dia::Sabado,
            Weekday::Sun => Dia::Domingo,
        }
    }

    fn indice(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dia {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.nombre())
    }
}

/// Franja de un día de la semana: activo/inactivo y ventana "HH:MM".
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FranjaDia {
    pub activo: bool,
    pub hora_inicio: String,
    pub hora_fin: String,
}

impl Default for FranjaDia {
    fn default() -> Self {
        FranjaDia {
            activo: false,
            hora_inicio: HORA_INICIO_DEFECTO.to_string(),
            hora_fin: HORA_FIN_DEFECTO.to_string(),
        }
    }
}

impl FranjaDia {
    pub fn activa(hora_inicio: &str, hora_fin: &str) -> Self {
        FranjaDia {
            activo: true,
            hora_inicio: hora_inicio.to_string(),
            hora_fin: hora_fin.to_string(),
        }
    }

    /// Parsea la forma plana del backend, "09:00-17:00". Una cadena vacía
    /// o que no tenga exactamente dos partes es un día inactivo.
    pub fn desde_cadena(cadena: &str) -> FranjaDia {
        let cadena = cadena.trim();
        if cadena.is_empty() {
            return FranjaDia::default();
        }

        let partes: Vec<&str> = cadena.split('-').collect();
        if partes.len() == 2 {
            FranjaDia::activa(partes[0].trim(), partes[1].trim())
        } else {
            FranjaDia::default()
        }
    }

    pub fn a_cadena(&self) -> String {
        if self.activo {
            format!("{}-{}", self.hora_inicio, self.hora_fin)
        } else {
            String::new()
        }
    }

    // Comparación lexicográfica: con "HH:MM" de ancho fijo equivale a la
    // comparación numérica, extremos inclusive.
    fn contiene(&self, hora: &str) -> bool {
        self.hora_inicio.as_str() <= hora && hora <= self.hora_fin.as_str()
    }
}

/// Horario semanal en su forma canónica: una franja por cada día.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct HorarioSemanal {
    franjas: [FranjaDia; 7],
}

impl HorarioSemanal {
    pub fn franja(&self, dia: Dia) -> &FranjaDia {
        &self.franjas[dia.indice()]
    }

    pub fn establecer(&mut self, dia: Dia, franja: FranjaDia) {
        self.franjas[dia.indice()] = franja;
    }

    /// Forma plana del backend: una cadena por día, Lunes a Domingo.
    pub fn desde_cadenas(cadenas: [&str; 7]) -> HorarioSemanal {
        let mut horario = HorarioSemanal::default();
        for (dia, cadena) in Dia::TODOS.iter().zip(cadenas.iter()) {
            horario.establecer(*dia, FranjaDia::desde_cadena(cadena));
        }
        horario
    }

    pub fn a_cadenas(&self) -> [String; 7] {
        let mut cadenas: [String; 7] = Default::default();
        for (dia, cadena) in Dia::TODOS.iter().zip(cadenas.iter_mut()) {
            *cadena = self.franja(*dia).a_cadena();
        }
        cadenas
    }
}

/// Forma antigua de la disponibilidad: una sola ventana compartida por un
/// subconjunto de días. Sin ventana configurada, cualquier hora del día
/// activo es válida.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VentanaGeneral {
    pub dias: Vec<Dia>,
    pub hora_inicio: Option<String>,
    pub hora_fin: Option<String>,
}

/// Las dos representaciones que pueden aparecer en datos persistidos. La
/// forma por día es la autoritativa; la general es el respaldo heredado.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Disponibilidad {
    PorDia(HorarioSemanal),
    General(VentanaGeneral),
}

impl Disponibilidad {
    /// Resuelve ambas representaciones a la forma canónica por día, una
    /// sola vez, antes de cualquier decisión.
    pub fn canonizar(&self) -> HorarioSemanal {
        match self {
            Disponibilidad::PorDia(horario) => horario.clone(),
            Disponibilidad::General(ventana) => {
                let franja = match (&ventana.hora_inicio, &ventana.hora_fin) {
                    (Some(inicio), Some(fin)) => FranjaDia::activa(inicio, fin),
                    _ => FranjaDia::activa("00:00", "23:59"),
                };

                let mut horario = HorarioSemanal::default();
                for dia in &ventana.dias {
                    horario.establecer(*dia, franja.clone());
                }
                horario
            }
        }
    }
}

/// Resultado de una regla: una denegación es un valor ordinario con su
/// razón, nunca un error.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Decision {
    pub permitido: bool,
    pub razon: Option<String>,
}

impl Decision {
    pub fn permitir() -> Self {
        Decision {
            permitido: true,
            razon: None,
        }
    }

    pub fn denegar<S: ToString>(razon: S) -> Self {
        Decision {
            permitido: false,
            razon: Some(razon.to_string()),
        }
    }
}

/// Decide si la fecha y hora solicitadas caen dentro de la disponibilidad
/// del programador.
///
/// Un programador sin disponibilidad configurada acepta cualquier horario.
/// Ese permisivo contrasta con un horario configurado con todos los días
/// inactivos, que no acepta ninguno; es el comportamiento observado del
/// sistema y se conserva tal cual.
pub fn puede_agendar(
    disponibilidad: Option<&Disponibilidad>,
    fecha: NaiveDate,
    hora: &str,
) -> Decision {
    let disponibilidad = match disponibilidad {
        Some(disponibilidad) => disponibilidad,
        None => return Decision::permitir(),
    };

    let dia = Dia::desde_fecha(fecha);
    let horario = disponibilidad.canonizar();
    let franja = horario.franja(dia);

    if !franja.activo {
        return Decision::denegar(format!("El programador no está disponible los {}", dia));
    }

    if !franja.contiene(hora) {
        return Decision::denegar(format!(
            "La hora solicitada está fuera del horario de atención para {} ({} - {})",
            dia, franja.hora_inicio, franja.hora_fin
        ));
    }

    Decision::permitir()
}

/// Decide si una asesoría puede cancelarse en el instante `ahora`.
///
/// Una solicitud pendiente se cancela sin condiciones; una aprobada solo
/// con al menos 24 horas de anticipación. Los estados terminales nunca se
/// cancelan. La fecha y hora almacenadas deben estar bien formadas; si no
/// lo están al evaluar una aprobada, se devuelve un error de validación.
pub fn puede_cancelar(
    estado: &str,
    fecha_asesoria: &str,
    hora_asesoria: &str,
    ahora: NaiveDateTime,
) -> anyhow::Result<Decision> {
    match estado {
        ESTADO_RECHAZADA => Ok(Decision::denegar(
            "No puedes cancelar una asesoría rechazada",
        )),
        ESTADO_CANCELADA => Ok(Decision::denegar("Esta asesoría ya está cancelada")),
        ESTADO_PENDIENTE => Ok(Decision::permitir()),
        ESTADO_APROBADA => {
            let inicio = crate::utils::combinar_fecha_hora(fecha_asesoria, hora_asesoria)
                .context("Fecha u hora de la asesoría mal formadas")?;
            let restante = inicio.signed_duration_since(ahora);
            if restante >= Duration::hours(HORAS_MINIMAS_CANCELACION) {
                Ok(Decision::permitir())
            } else {
                Ok(Decision::denegar(
                    "No puedes cancelar con menos de 24 horas de anticipación",
                ))
            }
        }
        _ => Ok(Decision {
            permitido: false,
            razon: None,
        }),
    }
}

/// Cancelar una asesoría ya aprobada exige un motivo declarado; cancelar
/// una solicitud todavía pendiente no.
pub fn requiere_motivo_cancelacion(estado: &str) -> bool {
    estado == ESTADO_APROBADA
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-01-01 fue lunes.
    fn fecha_de(dia: Dia) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1 + dia.indice() as u32).unwrap()
    }

    fn horario_lunes_manana() -> Disponibilidad {
        let mut horario = HorarioSemanal::default();
        horario.establecer(Dia::Lunes, FranjaDia::activa("09:00", "12:00"));
        Disponibilidad::PorDia(horario)
    }

    #[test]
    fn dia_desde_fecha_cubre_la_semana() {
        for dia in Dia::TODOS.iter() {
            assert_eq!(Dia::desde_fecha(fecha_de(*dia)), *dia);
        }
    }

    #[test]
    fn dia_desde_nombre_acepta_acentos_y_forma_plana() {
        assert_eq!(Dia::desde_nombre("Miércoles"), Some(Dia::Miercoles));
        assert_eq!(Dia::desde_nombre("Miercoles"), Some(Dia::Miercoles));
        assert_eq!(Dia::desde_nombre(" Sábado "), Some(Dia::Sabado));
        assert_eq!(Dia::desde_nombre("Lunes"), Some(Dia::Lunes));
        assert_eq!(Dia::desde_nombre("lunes"), None);
        assert_eq!(Dia::desde_nombre("Monday"), None);
    }

    #[test]
    fn sin_disponibilidad_todo_horario_es_valido() {
        let decision = puede_agendar(None, fecha_de(Dia::Domingo), "03:00");
        assert!(decision.permitido);
    }

    #[test]
    fn dia_inactivo_se_deniega_nombrando_el_dia() {
        let disponibilidad = horario_lunes_manana();
        let decision = puede_agendar(Some(&disponibilidad), fecha_de(Dia::Martes), "10:00");
        assert!(!decision.permitido);
        assert!(decision.razon.unwrap().contains("Martes"));
    }

    #[test]
    fn horario_todo_inactivo_nunca_es_agendable() {
        let disponibilidad = Disponibilidad::PorDia(HorarioSemanal::default());
        for dia in Dia::TODOS.iter() {
            let decision = puede_agendar(Some(&disponibilidad), fecha_de(*dia), "10:00");
            assert!(!decision.permitido);
        }
    }

    #[test]
    fn ventana_con_extremos_inclusive() {
        let disponibilidad = horario_lunes_manana();
        let lunes = fecha_de(Dia::Lunes);

        assert!(puede_agendar(Some(&disponibilidad), lunes, "09:00").permitido);
        assert!(puede_agendar(Some(&disponibilidad), lunes, "12:00").permitido);
        assert!(puede_agendar(Some(&disponibilidad), lunes, "10:00").permitido);

        let temprano = puede_agendar(Some(&disponibilidad), lunes, "08:59");
        assert!(!temprano.permitido);
        assert!(temprano.razon.unwrap().contains("09:00 - 12:00"));

        assert!(!puede_agendar(Some(&disponibilidad), lunes, "12:01").permitido);
    }

    #[test]
    fn forma_general_respeta_dias_y_ventana() {
        let disponibilidad = Disponibilidad::General(VentanaGeneral {
            dias: vec![Dia::Lunes, Dia::Martes],
            hora_inicio: Some("09:00".to_string()),
            hora_fin: Some("17:00".to_string()),
        });

        assert!(puede_agendar(Some(&disponibilidad), fecha_de(Dia::Lunes), "10:00").permitido);
        assert!(!puede_agendar(Some(&disponibilidad), fecha_de(Dia::Lunes), "18:00").permitido);

        let miercoles = puede_agendar(Some(&disponibilidad), fecha_de(Dia::Miercoles), "10:00");
        assert!(!miercoles.permitido);
        assert!(miercoles.razon.unwrap().contains("Miércoles"));
    }

    #[test]
    fn forma_general_sin_ventana_cubre_todo_el_dia() {
        let disponibilidad = Disponibilidad::General(VentanaGeneral {
            dias: vec![Dia::Viernes],
            hora_inicio: None,
            hora_fin: None,
        });

        let viernes = fecha_de(Dia::Viernes);
        assert!(puede_agendar(Some(&disponibilidad), viernes, "00:00").permitido);
        assert!(puede_agendar(Some(&disponibilidad), viernes, "23:59").permitido);
        assert!(!puede_agendar(Some(&disponibilidad), fecha_de(Dia::Sabado), "10:00").permitido);
    }

    #[test]
    fn pendiente_siempre_se_puede_cancelar() {
        let ahora = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        // Tanto en el pasado como en el futuro.
        let pasada = puede_cancelar(ESTADO_PENDIENTE, "2020-01-01", "10:00", ahora).unwrap();
        assert!(pasada.permitido);
        let futura = puede_cancelar(ESTADO_PENDIENTE, "2030-01-01", "10:00", ahora).unwrap();
        assert!(futura.permitido);
    }

    #[test]
    fn aprobada_respeta_las_24_horas() {
        let ahora = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        // 24 horas y un minuto: se permite.
        let holgada = puede_cancelar(ESTADO_APROBADA, "2024-06-16", "10:01", ahora).unwrap();
        assert!(holgada.permitido);

        // Exactamente 24 horas: se permite.
        let justa = puede_cancelar(ESTADO_APROBADA, "2024-06-16", "10:00", ahora).unwrap();
        assert!(justa.permitido);

        // 23 horas 59 minutos: se deniega.
        let corta = puede_cancelar(ESTADO_APROBADA, "2024-06-16", "09:59", ahora).unwrap();
        assert!(!corta.permitido);
        assert!(corta.razon.unwrap().contains("24 horas"));
    }

    #[test]
    fn estados_terminales_nunca_se_cancelan() {
        let ahora = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let rechazada = puede_cancelar(ESTADO_RECHAZADA, "2030-01-01", "10:00", ahora).unwrap();
        assert!(!rechazada.permitido);
        assert!(rechazada.razon.unwrap().contains("rechazada"));

        let cancelada = puede_cancelar(ESTADO_CANCELADA, "2030-01-01", "10:00", ahora).unwrap();
        assert!(!cancelada.permitido);
        assert!(cancelada.razon.unwrap().contains("cancelada"));
    }

    #[test]
    fn estado_desconocido_se_deniega_sin_razon() {
        let ahora = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let decision = puede_cancelar("finalizada", "2030-01-01", "10:00", ahora).unwrap();
        assert!(!decision.permitido);
        assert!(decision.razon.is_none());
    }

    #[test]
    fn aprobada_con_datos_mal_formados_es_error() {
        let ahora = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        assert!(puede_cancelar(ESTADO_APROBADA, "16/06/2024", "10:00", ahora).is_err());
        assert!(puede_cancelar(ESTADO_APROBADA, "2024-06-16", "mediodía", ahora).is_err());
    }

    #[test]
    fn motivo_obligatorio_solo_para_aprobadas() {
        assert!(requiere_motivo_cancelacion(ESTADO_APROBADA));
        assert!(!requiere_motivo_cancelacion(ESTADO_PENDIENTE));
        assert!(!requiere_motivo_cancelacion(ESTADO_RECHAZADA));
        assert!(!requiere_motivo_cancelacion(ESTADO_CANCELADA));
    }

    #[test]
    fn franja_desde_cadena() {
        let franja = FranjaDia::desde_cadena("09:00-17:00");
        assert!(franja.activo);
        assert_eq!(franja.hora_inicio, "09:00");
        assert_eq!(franja.hora_fin, "17:00");

        let vacia = FranjaDia::desde_cadena("");
        assert!(!vacia.activo);
        assert_eq!(vacia.hora_inicio, HORA_INICIO_DEFECTO);
        assert_eq!(vacia.hora_fin, HORA_FIN_DEFECTO);

        // Sin exactamente dos partes, el día queda inactivo.
        assert!(!FranjaDia::desde_cadena("09:00").activo);
        assert!(!FranjaDia::desde_cadena("09:00-12:00-15:00").activo);
    }

    #[test]
    fn horario_ida_y_vuelta_por_la_forma_plana() {
        let mut horario = HorarioSemanal::default();
        horario.establecer(Dia::Lunes, FranjaDia::activa("09:00", "12:00"));
        horario.establecer(Dia::Martes, FranjaDia::activa("14:00", "18:00"));
        horario.establecer(Dia::Sabado, FranjaDia::activa("10:00", "13:00"));

        let cadenas = horario.a_cadenas();
        assert_eq!(cadenas[0], "09:00-12:00");
        assert_eq!(cadenas[2], "");

        let prestadas: [&str; 7] = [
            &cadenas[0], &cadenas[1], &cadenas[2], &cadenas[3], &cadenas[4], &cadenas[5],
            &cadenas[6],
        ];
        assert_eq!(HorarioSemanal::desde_cadenas(prestadas), horario);
    }

    #[test]
    fn escenario_lunes_activo_martes_no() {
        let disponibilidad = horario_lunes_manana();

        assert!(puede_agendar(Some(&disponibilidad), fecha_de(Dia::Lunes), "10:00").permitido);

        let martes = puede_agendar(Some(&disponibilidad), fecha_de(Dia::Martes), "10:00");
        assert!(!martes.permitido);
        assert!(martes.razon.unwrap().contains("Martes"));
    }
}
