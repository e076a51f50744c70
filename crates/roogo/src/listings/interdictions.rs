use serde::Serialize;

/// Restriction tag a landlord can attach to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interdiction {
    pub id: &'static str,
    pub label: &'static str,
}

static INTERDICTIONS: [Interdiction; 6] = [
    Interdiction {
        id: "no_animaux",
        label: "Pas d'animaux",
    },
    Interdiction {
        id: "no_fumeurs",
        label: "Pas de fumeurs",
    },
    Interdiction {
        id: "no_fetes",
        label: "Pas de fêtes",
    },
    Interdiction {
        id: "no_sous_location",
        label: "Pas de sous-location",
    },
    Interdiction {
        id: "no_visites_nocturnes",
        label: "Pas de visites après 22h",
    },
    Interdiction {
        id: "no_commerce",
        label: "Pas d'activité commerciale",
    },
];

pub fn registry() -> &'static [Interdiction] {
    &INTERDICTIONS
}

/// Display label for `id`, or `id` itself when it is not registered.
pub fn label_of(id: &str) -> &str {
    INTERDICTIONS
        .iter()
        .find(|entry| entry.id == id)
        .map_or(id, |entry| entry.label)
}

/// Labels for `ids` in input order, or `None` when there is nothing to label.
pub fn labels_of<S: AsRef<str>>(ids: Option<&[S]>) -> Option<Vec<String>> {
    let ids = ids.filter(|ids| !ids.is_empty())?;
    Some(
        ids.iter()
            .map(|id| label_of(id.as_ref()).to_string())
            .collect(),
    )
}

/// Reverse lookup from a display label to its id.
pub fn id_for_label(label: &str) -> Option<&'static str> {
    INTERDICTIONS
        .iter()
        .find(|entry| entry.label == label)
        .map(|entry| entry.id)
}

/// Store tags by id: known labels are mapped back, everything else is kept verbatim.
pub fn normalize_tag(tag: &str) -> String {
    id_for_label(tag).unwrap_or(tag).to_string()
}
