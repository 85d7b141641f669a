//! Shared fixtures: the full 40-cell board and session helpers.

use serde_json::{json, Value};

use magnate::{BoardDefinition, GameSession, ScriptedDice};

fn special(id: u8, name: &str) -> Value {
    json!({ "id": id, "type": "special", "name": name })
}

fn property(
    id: u8,
    name: &str,
    color: &str,
    price: i64,
    base: i64,
    with_house: [i64; 4],
    with_hotel: i64,
) -> Value {
    json!({
        "id": id, "type": "property", "name": name, "color": color,
        "price": price, "mortgage": price / 2,
        "rent": { "base": base, "withHouse": with_house, "withHotel": with_hotel }
    })
}

fn railroad(id: u8, name: &str) -> Value {
    json!({
        "id": id, "type": "railroad", "name": name,
        "price": 200, "mortgage": 100,
        "rent": [0, 25, 50, 100, 200]
    })
}

fn tax(id: u8, name: &str, amount: i64) -> Value {
    json!({ "id": id, "type": "tax", "name": name, "action": { "money": amount } })
}

fn chance(id: u8) -> Value {
    json!({ "id": id, "type": "chance", "name": "Suerte" })
}

fn community_chest(id: u8) -> Value {
    json!({ "id": id, "type": "community_chest", "name": "Arca Comunal" })
}

/// The classic 40-cell perimeter: 22 color-group properties, 4 railroads,
/// 2 taxes, card cells, and the four corners.
pub fn classic_board() -> BoardDefinition {
    let bottom = vec![
        special(0, "Salida"),
        property(1, "Avenida Mediterránea", "brown", 60, 2, [10, 30, 90, 160], 250),
        community_chest(2),
        property(3, "Avenida Báltica", "brown", 60, 4, [20, 60, 180, 320], 450),
        tax(4, "Impuesto sobre la Renta", -200),
        railroad(5, "Ferrocarril del Sur"),
        property(6, "Avenida Oriental", "lightblue", 100, 6, [30, 90, 270, 400], 550),
        chance(7),
        property(8, "Avenida Vermont", "lightblue", 100, 6, [30, 90, 270, 400], 550),
        property(9, "Avenida Connecticut", "lightblue", 120, 8, [40, 100, 300, 450], 600),
    ];
    let left = vec![
        special(10, "Cárcel"),
        property(11, "Plaza San Carlos", "pink", 140, 10, [50, 150, 450, 625], 750),
        special(12, "Compañía de Luz"),
        property(13, "Avenida de los Estados", "pink", 140, 10, [50, 150, 450, 625], 750),
        property(14, "Avenida Virginia", "pink", 160, 12, [60, 180, 500, 700], 900),
        railroad(15, "Ferrocarril del Oeste"),
        property(16, "Plaza Santiago", "orange", 180, 14, [70, 200, 550, 750], 950),
        community_chest(17),
        property(18, "Avenida Tennessee", "orange", 180, 14, [70, 200, 550, 750], 950),
        property(19, "Avenida Nueva York", "orange", 200, 16, [80, 220, 600, 800], 1000),
    ];
    let top = vec![
        special(20, "Parque Gratuito"),
        property(21, "Avenida Kentucky", "red", 220, 18, [90, 250, 700, 875], 1050),
        chance(22),
        property(23, "Avenida Indiana", "red", 220, 18, [90, 250, 700, 875], 1050),
        property(24, "Avenida Illinois", "red", 240, 20, [100, 300, 750, 925], 1100),
        railroad(25, "Ferrocarril del Norte"),
        property(26, "Avenida Atlántica", "yellow", 260, 22, [110, 330, 800, 975], 1150),
        property(27, "Avenida Ventnor", "yellow", 260, 22, [110, 330, 800, 975], 1150),
        special(28, "Compañía de Agua"),
        property(29, "Jardines Marvin", "yellow", 280, 24, [120, 360, 850, 1025], 1200),
    ];
    let right = vec![
        json!({ "id": 30, "type": "special", "name": "Ve a la Cárcel",
                "action": { "goTo": "jail" } }),
        property(31, "Avenida Pacífico", "green", 300, 26, [130, 390, 900, 1100], 1275),
        property(32, "Avenida Carolina", "green", 300, 26, [130, 390, 900, 1100], 1275),
        community_chest(33),
        property(34, "Avenida Pensilvania", "green", 320, 28, [150, 450, 1000, 1200], 1400),
        railroad(35, "Ferrocarril del Este"),
        chance(36),
        property(37, "Plaza del Parque", "blue", 350, 35, [175, 500, 1100, 1300], 1500),
        tax(38, "Impuesto de Lujo", -100),
        property(39, "El Paseo", "blue", 400, 50, [200, 600, 1400, 1700], 2000),
    ];

    serde_json::from_value(json!({
        "bottom": bottom, "left": left, "top": top, "right": right,
        "chance": [
            { "description": "El banco te paga un dividendo", "action": { "money": 50 } },
            { "description": "Ve directamente a la Cárcel", "action": { "goTo": "jail" } },
            { "description": "Avanza hasta la Salida", "action": { "moveTo": 0 } }
        ],
        "community_chest": [
            { "description": "Error bancario a tu favor", "action": { "money": 200 } },
            { "description": "Honorarios médicos", "action": { "money": -50 } }
        ]
    }))
    .expect("classic board fixture")
}

/// A running session on the classic board with scripted dice.
pub fn running_session(players: &[(&str, &str)], dice: ScriptedDice) -> GameSession {
    let mut session = GameSession::new(
        &classic_board(),
        Vec::new(),
        magnate::GameConfig::default(),
        Box::new(dice),
    )
    .expect("classic board loads");
    for (i, (nickname, country)) in players.iter().enumerate() {
        let colors = ["#5B9BD5", "#7FB77E", "#E8A34A", "#C96868"];
        session.add_player(*nickname, *country, colors[i]).expect("setup open");
    }
    session.start().expect("2-4 players");
    session
}

/// Two players, Ana and Beto, ready to play.
pub fn two_player_session(dice: ScriptedDice) -> GameSession {
    running_session(&[("Ana", "CO"), ("Beto", "MX")], dice)
}
