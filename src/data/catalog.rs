//! Static game catalog
//!
//! The fixed list of games shown on the board, in page order. Ids double as
//! the `id` attribute of each game's row in the displayed document.

use super::GameDescriptor;

/// Static array of every game on the board
pub static GAMES: [GameDescriptor; 79] = [
    GameDescriptor { id: "DR", name: "DELHI ROSE" },
    GameDescriptor { id: "SS", name: "SHIV SHAKTI" },
    GameDescriptor { id: "CT", name: "CHAND TARA" },
    GameDescriptor { id: "NG", name: "NEW GANGA" },
    GameDescriptor { id: "MB", name: "MAA BHAGWATI" },
    GameDescriptor { id: "AK", name: "ANARKALI" },
    GameDescriptor { id: "DA", name: "DUBAI DELHI" },
    GameDescriptor { id: "BL", name: "BADLAPUR" },
    GameDescriptor { id: "TJ", name: "TAJ" },
    GameDescriptor { id: "RC", name: "ROYAL CHALLENGE" },
    GameDescriptor { id: "MH", name: "MOHALI" },
    GameDescriptor { id: "DB", name: "DELHI BAZAR" },
    GameDescriptor { id: "MC", name: "MEERUT CITY" },
    GameDescriptor { id: "MR", name: "MANGAL BAZAR" },
    GameDescriptor { id: "BJ", name: "BURJ KHALIFA - BK" },
    GameDescriptor { id: "KB", name: "KALKA BAZAR" },
    GameDescriptor { id: "SV", name: "SAVERA" },
    GameDescriptor { id: "SP", name: "SUPER DELHI" },
    GameDescriptor { id: "DC", name: "DELHI CITY" },
    GameDescriptor { id: "ST", name: "SUPER TAJ" },
    GameDescriptor { id: "JR", name: "JAIPUR KING" },
    GameDescriptor { id: "DZ", name: "DELHI DREAM" },
    GameDescriptor { id: "PL", name: "PLAY BAZAAR" },
    GameDescriptor { id: "DE", name: "DELHI DARBAR" },
    GameDescriptor { id: "SG", name: "SHRI GANESH" },
    GameDescriptor { id: "GD", name: "GHAZIABAD DIN" },
    GameDescriptor { id: "BT", name: "BADRINATH" },
    GameDescriptor { id: "HI", name: "HINDUSTAN" },
    GameDescriptor { id: "MJ", name: "MAHARAJ" },
    GameDescriptor { id: "UK", name: "UTTARAKHAND - UK" },
    GameDescriptor { id: "ZZ", name: "ZAM-ZAM" },
    GameDescriptor { id: "FB", name: "FARIDABAD" },
    GameDescriptor { id: "RA", name: "RAJDHANI" },
    GameDescriptor { id: "HG", name: "HYDERABAD GOLD" },
    GameDescriptor { id: "NL", name: "NEELKANTH" },
    GameDescriptor { id: "SL", name: "SHRI LAXMI" },
    GameDescriptor { id: "UN", name: "UTTAM NAGAR" },
    GameDescriptor { id: "DI", name: "DUBAI BAZAR" },
    GameDescriptor { id: "PS", name: "PARAS" },
    GameDescriptor { id: "FR", name: "FARIDA BAZAR" },
    GameDescriptor { id: "DG", name: "DELHI GOLDEN" },
    GameDescriptor { id: "ES", name: "DELHI STAR" },
    GameDescriptor { id: "KU", name: "DHAN KUBER" },
    GameDescriptor { id: "TB", name: "TODAY BAZAAR" },
    GameDescriptor { id: "RY", name: "ROYAL DELHI" },
    GameDescriptor { id: "NS", name: "NEW SAHIBABAD" },
    GameDescriptor { id: "SW", name: "SAWARIYA SETH" },
    GameDescriptor { id: "PR", name: "PARIS BAZAR" },
    GameDescriptor { id: "GR", name: "GALI DISAWAR MIX" },
    GameDescriptor { id: "WG", name: "WHITE GOLD" },
    GameDescriptor { id: "UB", name: "UP BAZAR" },
    GameDescriptor { id: "BR", name: "NEW DELHI DARBAR" },
    GameDescriptor { id: "GZ", name: "GHAZIABAD NIGHT" },
    GameDescriptor { id: "BI", name: "BRIJ RANI" },
    GameDescriptor { id: "VS", name: "SHRI VISHNU" },
    GameDescriptor { id: "GB", name: "GHAZIABAD" },
    GameDescriptor { id: "2Z", name: "GHAZIABAD 2" },
    GameDescriptor { id: "RB", name: "RAM BAZAR" },
    GameDescriptor { id: "UP", name: "UTTAR PRADESH" },
    GameDescriptor { id: "BS", name: "BIKANER SUPER" },
    GameDescriptor { id: "DS", name: "DESAWAR" },
    GameDescriptor { id: "2D", name: "DISAWAR 2" },
    GameDescriptor { id: "NP", name: "NEW PUNJAB" },
    GameDescriptor { id: "GM", name: "GURU MANGAL" },
    GameDescriptor { id: "BG", name: "BAGAD" },
    GameDescriptor { id: "SU", name: "SUPER KING" },
    GameDescriptor { id: "MO", name: "MATKA SONE KA" },
    GameDescriptor { id: "UI", name: "U.P KING" },
    GameDescriptor { id: "RJ", name: "RAJDHANI JAIPUR" },
    GameDescriptor { id: "AZ", name: "AGRA BAZAR" },
    GameDescriptor { id: "BK", name: "BIHAR KING" },
    GameDescriptor { id: "JC", name: "JANTA CITY" },
    GameDescriptor { id: "EG", name: "SHREE GANGA NAGAR" },
    GameDescriptor { id: "BD", name: "BALA JI DADRI" },
    GameDescriptor { id: "JM", name: "JAISALMER" },
    GameDescriptor { id: "CG", name: "CHOTI GALI" },
    GameDescriptor { id: "NW", name: "NEW GALI" },
    GameDescriptor { id: "GL", name: "GALI" },
    GameDescriptor { id: "2G", name: "GALI 2" },
];

/// Returns the full catalog in page order
pub fn all_games() -> &'static [GameDescriptor] {
    &GAMES
}

/// Get a game by its id
///
/// # Example
///
/// ```
/// use resultboard::data::catalog::get_game_by_id;
///
/// if let Some(game) = get_game_by_id("DS") {
///     println!("Found: {}", game.name);
/// }
/// ```
pub fn get_game_by_id(id: &str) -> Option<&'static GameDescriptor> {
    GAMES.iter().find(|game| game.id == id)
}
