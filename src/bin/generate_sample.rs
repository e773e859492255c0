//! Writes a deterministic sample `tabla_integral_criticos_2024.csv` in the
//! working directory, for local development and demos.

use std::error::Error;

const OUTPUT: &str = "tabla_integral_criticos_2024.csv";

const COLUMNS: [&str; 29] = [
    "Nombre Establecimiento",
    "RBD",
    "Comuna",
    "Cat_2019_Basica",
    "Cat_2019_Media",
    "Simce_Lect_4B",
    "Simce_Mate_4B",
    "Simce_Lect_2M",
    "Simce_Mate_2M",
    "Autoestima_4B",
    "Clima_4B",
    "Participacion_4B",
    "Habitos_4B",
    "Autoestima_2M",
    "Clima_2M",
    "Participacion_2M",
    "Habitos_2M",
    "Pct_Insuf_Lect_4B",
    "Pct_Elem_Lect_4B",
    "Pct_Adec_Lect_4B",
    "Pct_Insuf_Mate_4B",
    "Pct_Elem_Mate_4B",
    "Pct_Adec_Mate_4B",
    "Pct_Insuf_Lect_2M",
    "Pct_Elem_Lect_2M",
    "Pct_Adec_Lect_2M",
    "Pct_Insuf_Mate_2M",
    "Pct_Elem_Mate_2M",
    "Pct_Adec_Mate_2M",
];

const COMUNAS: [&str; 8] = [
    "La Serena",
    "Coquimbo",
    "Ovalle",
    "Illapel",
    "Vicuña",
    "Los Vilos",
    "Andacollo",
    "Monte Patria",
];

const KINDS: [&str; 3] = ["Escuela", "Liceo", "Colegio"];

const NAMES: [&str; 10] = [
    "Gabriela Mistral",
    "Pablo Neruda",
    "Arturo Prat",
    "Los Carrera",
    "El Olivar",
    "San Rafael",
    "Diego Portales",
    "La Higuera",
    "Punta de Choros",
    "Cerro Grande",
];

const CATEGORIES: [&str; 3] = ["INSUFICIENTE", "MEDIO-BAJO", "MEDIO"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() as usize) % options.len()]
    }
}

fn score(rng: &mut SimpleRng, center: f64, spread: f64) -> String {
    format!("{:.1}", rng.range(center - spread, center + spread))
}

/// Maybe-missing score: roughly 8% of cells are left empty.
fn sparse_score(rng: &mut SimpleRng, center: f64, spread: f64) -> String {
    if rng.chance(0.08) {
        String::new()
    } else {
        score(rng, center, spread)
    }
}

/// Three band percentages summing to exactly 100.0, worst-heavy.
fn distribution(rng: &mut SimpleRng) -> [String; 3] {
    let insuf = (rng.range(35.0, 70.0) * 10.0).round() / 10.0;
    let elem = ((100.0 - insuf) * rng.range(0.4, 0.7) * 10.0).round() / 10.0;
    let adec = ((100.0 - insuf - elem) * 10.0).round() / 10.0;
    [
        format!("{insuf:.1}"),
        format!("{elem:.1}"),
        format!("{adec:.1}"),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(20240731);
    let mut writer = csv::Writer::from_path(OUTPUT)?;
    writer.write_record(COLUMNS)?;

    let mut used_names: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut rbd = 400;
    let mut rows = 0usize;
    for comuna in COMUNAS {
        let per_comuna = 3 + (rng.next_u64() % 3) as usize;
        for _ in 0..per_comuna {
            rbd += 1 + (rng.next_u64() % 37) as i64;
            let mut nombre = format!("{} {}", rng.pick(&KINDS), rng.pick(&NAMES));
            // Shared patron names happen; qualify repeats by comuna so the
            // institution picker stays unambiguous.
            if !used_names.insert(nombre.clone()) {
                nombre = format!("{nombre} de {comuna}");
                used_names.insert(nombre.clone());
            }

            let mut record: Vec<String> = vec![
                nombre,
                rbd.to_string(),
                comuna.to_string(),
                rng.pick(&CATEGORIES).to_string(),
                if rng.chance(0.15) {
                    String::new()
                } else {
                    rng.pick(&CATEGORIES).to_string()
                },
            ];

            // Simce scores per grade/subject.
            record.push(sparse_score(&mut rng, 235.0, 45.0));
            record.push(sparse_score(&mut rng, 228.0, 45.0));
            record.push(sparse_score(&mut rng, 222.0, 45.0));
            record.push(sparse_score(&mut rng, 216.0, 45.0));

            // IDPS indicators, both grades.
            for _ in 0..8 {
                record.push(sparse_score(&mut rng, 72.0, 12.0));
            }

            // Standards distribution: grade × subject.
            for _ in 0..4 {
                if rng.chance(0.06) {
                    record.extend([String::new(), String::new(), String::new()]);
                } else {
                    record.extend(distribution(&mut rng));
                }
            }

            writer.write_record(&record)?;
            rows += 1;
        }
    }

    writer.flush()?;
    println!("Wrote {rows} establecimientos to {OUTPUT}");
    Ok(())
}
