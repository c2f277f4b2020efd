use actix_web::{HttpResponse, Responder};
use serde_json::json;

pub async fn help_handler() -> impl Responder {
    let example = "Student ID: 123456789\nCSC 101 Intro to Programming 3.000 3.000 A\nENG 110 Composition 3.000 3.000 B+\n";

    let help = json!({
        "description": "API para extraer cursos aprobados desde un certificado de notas y listar los requisitos pendientes de la carrera.",
        "routes": {
            "POST /transcript/preview": "texto del certificado en el body; devuelve los cursos extraídos sin guardarlos",
            "POST /transcript": "texto del certificado en el body; extrae y guarda los cursos",
            "POST /transcript/upload": "multipart, un archivo de texto por parte",
            "GET /students/{id}/courses": "cursos guardados del estudiante",
            "GET /students/{id}/unmet": "requisitos pendientes, ordenados por categoría y código",
            "DELETE /completed": "borra los cursos de todos los estudiantes",
            "GET /catalog/search?q=...": "búsqueda por código o nombre",
            "GET /courses/search?table=...&q=...": "códigos de curso en una tabla del directorio (GeneralEducationCourses, ComputerScienceCourses, CrossListedCourses, CourseSchedules)",
            "GET /courses/{code}": "ficha del curso en las tablas de GE, computación y cursos compartidos; 404 si no existe",
            "GET /courses/{code}/schedules": "horarios de los cursos cuyo código contiene {code}",
            "GET /courses/{code}/schedules/{id}": "un horario; 404 si no existe",
            "GET /uploads?limit=10": "últimos certificados procesados"
        },
        "transcript_example": example,
        "note": "Una línea que empieza con tres letras mayúsculas, un espacio y tres dígitos abre un registro de curso. La nota es opcional; sin nota se guarda 'N/A'.",
        "passing_grades": crate::models::PASSING_GRADES
    });

    HttpResponse::Ok().json(help)
}
