//! Fixed prompt strings for the dialogue, one locale (es).

pub const GREETING: &str = "¡Saludos! Mi nombre es Miralunas y estoy aquí para explorar los \
misterios de tu astrología. ¿Cómo te llamas?";

pub const BAD_NAME: &str =
    "No he llegado a ver tu nombre entre las brumas, ¿puedes repetírmelo?";

pub const NAME_TOO_LONG: &str =
    "Tu nombre parece muy largo, ¿puedes darme un nombre más corto?";

pub const ASK_YEAR: &str = "Un placer conocerte, ¿en qué año (AAAA) cruzaste por primera vez \
el umbral del tiempo?";

pub const BAD_YEAR: &str = "Ese año no parece válido, intenta otro por favor.";

pub const ASK_MONTH: &str = "Ahora dime, ¿en qué mes (MM) el sol te vio nacer?";

pub const BAD_MONTH: &str = "Ese mes no parece válido, intenta otro por favor.";

pub const ASK_DAY: &str = "Interesante, ¿y qué día (DD) despertaste a este mundo?";

pub const BAD_DAY: &str = "Ese día no parece válido, intenta otro por favor.";

pub const ASK_TIME: &str = "¿A la luz de qué momento tu magia comenzó a fluir? Dime la hora \
en formato HH:MM (24h)";

pub const BAD_TIME: &str = "Por favor, asegúrate de usar el formato correcto HH:MM.";

pub const ASK_LOCATION: &str = "Fascinante, ¿cuál es el lugar de poder donde tu esencia fue \
invocada por primera vez? (Indica la ciudad grande más cercana)";

pub const LOCATION_TOO_LONG: &str =
    "Ese lugar parece muy largo, ¿puedes indicar una ciudad grande más cercana?";

pub const ASK_COUNTRY: &str = "No conozco esa ciudad. ¿Me das el código de dos letras de su \
país? (por ejemplo ES, UY, AR)";

pub const BAD_COUNTRY: &str =
    "Ese código no parece válido, necesito exactamente dos letras (como ES o UY).";

pub const CONSULTING: &str = "Permíteme unos instantes mientras la brujilla consulta los \
astros y teje tu predicción...";

pub const CHART_HEADER: &str = "¡Aquí está tu carta astral, revelada ante mí!";

pub const PREDICTION_HEADER: &str = "Con las estrellas como testigo, aquí está tu predicción:";

pub const PREDICTION_FALLBACK: &str = "Las estrellas guardan silencio en este momento y no he \
podido tejer tu predicción completa. Tu carta astral queda contigo.";

pub const CHART_FAILED: &str = "Hubo un error al generar tu carta astral. Por favor, intenta \
de nuevo más tarde.";

pub const REPEAT_OFFER: &str = "¡Espero que mis palabras resuenen contigo! ¿Quieres seguir \
preguntándome por otras almas de las que desees conocer más?";

pub const REPEAT_PLACEHOLDER: &str = "¿Sí o No?";

pub const REPEAT_CHOICES: [&str; 2] = ["Sí", "No"];

pub const REPEAT_YES: &str = "¡Maravilloso! ¿Cómo se llama esta nueva alma?";

pub const FAREWELL: &str = "Lamentablemente nos despedimos. ¡Espero que nuestros caminos se \
crucen de nuevo!";
