//! Starter collection loaded at startup.

use crate::library::Catalog;

const PHYSICAL_BOOKS: &[(&str, &str, u32)] = &[
    ("The Silent Echo", "Emma Blackwood", 82),
    ("Whispers in the Dark", "Liam Hunter", 150),
    ("The Last Embrace", "Dylan Cooper", 199),
    ("The Forgotten Path", "James Whitmore", 177),
    ("Shadows of the Lost", "Grace Bennett", 43),
    ("The Hidden Garden", "Ava Montgomery", 37),
    ("Fragments of the Past", "Nora Stevens", 163),
    ("The Burning Sky", "Oliver Gray", 185),
    ("Dance of the Stars", "Harper Wilson", 135),
    ("Shattered Glass", "Sebastian Cole", 180),
    ("Between Worlds", "Jasper Ford", 211),
    ("The Heart of the Storm", "Mason White", 129),
    ("A Symphony of Souls", "Leo Knight", 53),
];

const ONLINE_BOOKS: &[(&str, &str, &str)] = &[
    ("The Shadow's Edge", "Clara Mills", "www.myOnlineBook/index/ApbD7fI2"),
    ("The Forgotten Kingdom", "Henry Wright", "www.myOnlineBook/index/W7kRm9Dg"),
    ("The Depths of Desire", "Lena Murphy", "www.myOnlineBook/index/X4nB2qJk"),
    ("The Silent Witness", "David Reed", "www.myOnlineBook/index/F3nGp0Ls"),
    ("Requiem for the Lost", "Natalie Stone", "www.myOnlineBook/index/P1cQxR8I"),
    ("Journey into the Unknown", "Isobel Price", "www.myOnlineBook/index/Uj4Cz1T9"),
    ("A World of Dreams", "Mason Hart", "www.myOnlineBook/index/L1zX9fT6"),
    ("The Edge of Tomorrow", "Ethan Matthews", "www.myOnlineBook/index/M0yJq2F7"),
    ("Whispers in the Wind", "Benjamin Miles", "www.myOnlineBook/index/Z0mV9p4J"),
];

/// Add the starter books (physical first, then online)
pub fn seed_catalog(catalog: &mut Catalog) {
    for &(title, author, shelf_number) in PHYSICAL_BOOKS {
        catalog.add(catalog.physical(title, author, shelf_number));
    }
    for &(title, author, url) in ONLINE_BOOKS {
        catalog.add(catalog.online(title, author, url));
    }
}
