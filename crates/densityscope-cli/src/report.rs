//! Terminal and JSON rendering of clustering runs

use colored::Colorize;
use densityscope_core::{
    best_index_by_clustering_ratio, Clustering, ClusteringStats, ClusteringSummary, CoreRule,
    DbscanParams, Label, Point, PointRole, Profession, ScenarioOutcome, Scene, SweepEntry,
};
use serde::Serialize;

/// Everything the `cluster` command reports
#[derive(Debug, Serialize)]
pub struct ClusterReport<'a> {
    pub scene: Scene,
    pub seed: u64,
    pub params: DbscanParams,
    pub stats: ClusteringStats,
    pub clusters: &'a ClusteringSummary,
    pub points: Vec<LabelledPoint<'a>>,
}

#[derive(Debug, Serialize)]
pub struct LabelledPoint<'a> {
    #[serde(flatten)]
    pub point: &'a Point,
    pub label: Label,
    pub role: PointRole,
}

impl<'a> ClusterReport<'a> {
    pub fn new(
        scene: Scene,
        seed: u64,
        points: &'a [Point],
        clustering: &'a Clustering,
        summary: &'a ClusteringSummary,
    ) -> Self {
        let points = points
            .iter()
            .zip(clustering.labels.iter().zip(&clustering.roles))
            .map(|(point, (&label, &role))| LabelledPoint { point, label, role })
            .collect();

        Self {
            scene,
            seed,
            params: clustering.params,
            stats: summary.statistics(),
            clusters: summary,
            points,
        }
    }

    pub fn print(&self) {
        let params = &self.params;
        println!(
            "{} {} {}",
            "DBSCAN".bold(),
            self.scene.to_string().cyan(),
            format!("(seed {})", self.seed).dimmed()
        );
        println!(
            "  eps = {}, min_pts = {}, core rule = {}",
            params.eps, params.min_pts, params.core_rule
        );
        println!();

        let stats = &self.stats;
        println!("{}", "Statistics".bold().underline());
        println!("  Points:    {}", stats.total_points);
        println!("  Clusters:  {}", stats.num_clusters.to_string().green());
        println!(
            "  Clustered: {} ({:.1}%)",
            stats.clustered_points,
            stats.clustering_ratio * 100.0
        );
        println!("  Core:      {}", stats.core_points);
        println!("  Border:    {}", stats.border_points);
        println!("  Noise:     {}", stats.noise_points.to_string().yellow());
        println!();

        if self.clusters.clusters.is_empty() {
            println!("{}", "No clusters found".yellow());
        }
        for cluster in &self.clusters.clusters {
            println!(
                "  {} {:>3} points  core {:>3}  border {:>3}  centroid ({:.2}, {:.2})",
                format!("cluster {:>2}", cluster.id).green(),
                cluster.size(),
                cluster.core_count,
                cluster.border_count,
                cluster.centroid.0,
                cluster.centroid.1
            );
        }

        if !self.clusters.noise.is_empty() {
            let ids: Vec<String> = self.clusters.noise.iter().map(|id| id.to_string()).collect();
            println!("  {} {}", "noise".yellow(), ids.join(", "));
        }
    }
}

/// Everything the `sweep` command reports
#[derive(Debug, Serialize)]
pub struct SweepReport<'a> {
    pub scene: Scene,
    pub seed: u64,
    pub core_rule: CoreRule,
    pub entries: &'a [SweepEntry],
    pub best: Option<&'a SweepEntry>,
    #[serde(skip)]
    best_index: Option<usize>,
}

impl<'a> SweepReport<'a> {
    pub fn new(scene: Scene, seed: u64, core_rule: CoreRule, entries: &'a [SweepEntry]) -> Self {
        let best_index = best_index_by_clustering_ratio(entries);
        Self {
            scene,
            seed,
            core_rule,
            entries,
            best: best_index.map(|i| &entries[i]),
            best_index,
        }
    }

    /// Table rows, each flagged when it is the best entry
    fn rows(&self) -> Vec<(String, bool)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let line = format!(
                    "{:>10.2} {:>8} {:>9} {:>7} {:>9.1}%",
                    entry.eps,
                    entry.min_pts,
                    entry.stats.num_clusters,
                    entry.stats.noise_points,
                    entry.stats.clustering_ratio * 100.0
                );
                (line, self.best_index == Some(i))
            })
            .collect()
    }

    pub fn print(&self) {
        println!(
            "{} {} {}",
            "Sweep".bold(),
            self.scene.to_string().cyan(),
            format!("(seed {}, core rule {})", self.seed, self.core_rule).dimmed()
        );
        println!();
        println!(
            "{:>10} {:>8} {:>9} {:>7} {:>10}",
            "eps", "min_pts", "clusters", "noise", "clustered"
        );

        for (line, is_best) in self.rows() {
            if is_best {
                println!("{}", line.green().bold());
            } else {
                println!("{}", line);
            }
        }

        if let Some(best) = self.best {
            println!();
            println!(
                "{} eps = {}, min_pts = {} ({} clusters, {} noise)",
                "Best:".bold(),
                best.eps,
                best.min_pts,
                best.stats.num_clusters,
                best.stats.noise_points
            );
        }
    }
}

/// Everything the `compare` command reports
#[derive(Debug, Serialize)]
pub struct CompareReport<'a> {
    pub profession: Profession,
    pub seed: u64,
    pub points: usize,
    pub outcomes: &'a [ScenarioOutcome],
}

impl CompareReport<'_> {
    pub fn print(&self) {
        println!(
            "{} {} {}",
            "Compare".bold(),
            self.profession.to_string().cyan(),
            format!("(seed {}, {} points, normalised)", self.seed, self.points).dimmed()
        );

        for outcome in self.outcomes {
            let preset = &outcome.preset;
            println!();
            println!("{} {}", preset.title.bold(), format!("[{}]", preset.level).dimmed());
            println!("  {}", preset.description);
            println!(
                "  eps = {} (scaled {:.4}), min_pts = {}",
                preset.eps, outcome.scaled_eps, preset.min_pts
            );
            println!(
                "  {} clusters, {} noise, {:.1}% clustered",
                outcome.stats.num_clusters.to_string().green(),
                outcome.stats.noise_points.to_string().yellow(),
                outcome.stats.clustering_ratio * 100.0
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use densityscope_core::{sweep, ClusterEngine};

    #[test]
    fn test_cluster_report_json_shape() {
        let points = vec![
            Point::new("a", 0.0, 0.0),
            Point::new("b", 1.0, 0.0),
            Point::new("c", 2.0, 0.0),
            Point::new("far", 50.0, 0.0),
        ];
        let clustering = ClusterEngine::new(DbscanParams::new(1.5, 1)).run(&points).unwrap();
        let summary = ClusteringSummary::from_run(&points, &clustering).unwrap();
        let report = ClusterReport::new(Scene::Live, 3, &points, &clustering, &summary);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scene"], "live");
        assert_eq!(json["stats"]["num_clusters"], 1);
        assert_eq!(json["points"][0]["id"], "a");
        assert_eq!(json["points"][0]["label"], 0);
        assert_eq!(json["points"][3]["label"], -1);
        assert_eq!(json["points"][3]["role"], "noise");
        assert_eq!(json["clusters"]["noise"][0], "far");
    }

    #[test]
    fn test_repeated_sweep_pairs_highlight_one_row() {
        let points: Vec<Point> = (0..6usize).map(|i| Point::new(i, i as f64, 0.0)).collect();
        let entries = sweep(&points, &[2.0, 2.0], &[2], CoreRule::ExcludeSelf).unwrap();
        let report = SweepReport::new(Scene::Live, 1, CoreRule::ExcludeSelf, &entries);

        let rows = report.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, rows[1].0);
        assert_eq!(rows.iter().filter(|(_, best)| *best).count(), 1);
        assert!(rows[0].1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["best"]["eps"], 2.0);
        assert!(json.get("best_index").is_none());
    }
}
