//! Text rendering of clustering results.
//!
//! The engines return plain values; this module is the only place that turns
//! them into text. Heights and distances keep full precision everywhere else
//! and are rounded here.
//!
//! Dendrograms render as indented markup:
//!
//! ```text
//! <tree height="7.810">
//!    <node height="1.000">
//!       <leaf height="0.000" data="0, 0"/>
//!       <leaf height="0.000" data="0, 1"/>
//!    </node>
//!    ...
//! </tree>
//! ```

use core::fmt;

use crate::cluster::KmeansFit;
use crate::data::Dataset;
use crate::hierarchy::{Dendrogram, NodeId};

const INDENT: &str = "   ";

/// Decimal places used for heights.
pub const HEIGHT_PRECISION: usize = 3;

/// Displays the subtree under a node as indented markup.
#[derive(Debug, Clone, Copy)]
pub struct DendrogramXml<'a> {
    tree: &'a Dendrogram,
    root: NodeId,
}

impl<'a> DendrogramXml<'a> {
    /// Render the subtree rooted at `root`.
    pub fn new(tree: &'a Dendrogram, root: NodeId) -> Self {
        Self { tree, root }
    }

    fn write_children(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.tree.node(id) else {
            return Ok(());
        };
        for &child_id in node.children() {
            let Some(child) = self.tree.node(child_id) else {
                continue;
            };
            let pad = INDENT.repeat(depth);
            if child.is_leaf() {
                writeln!(
                    f,
                    "{pad}<leaf height=\"{:.*}\" data=\"{}\"/>",
                    HEIGHT_PRECISION,
                    child.height,
                    child.point_to_string()
                )?;
            } else {
                writeln!(f, "{pad}<node height=\"{:.*}\">", HEIGHT_PRECISION, child.height)?;
                self.write_children(f, child_id, depth + 1)?;
                writeln!(f, "{pad}</node>")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DendrogramXml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.tree.node(self.root) else {
            return Ok(());
        };
        writeln!(f, "<tree height=\"{:.*}\">", HEIGHT_PRECISION, root.height)?;
        if root.is_leaf() {
            writeln!(
                f,
                "{INDENT}<leaf height=\"{:.*}\" data=\"{}\"/>",
                HEIGHT_PRECISION,
                root.height,
                root.point_to_string()
            )?;
        }
        self.write_children(f, self.root, 1)?;
        writeln!(f, "</tree>")
    }
}

/// Render the subtree rooted at `root` as indented markup.
pub fn dendrogram_xml(tree: &Dendrogram, root: NodeId) -> String {
    DendrogramXml::new(tree, root).to_string()
}

/// Displays a k-means result as a plain-text report.
#[derive(Debug, Clone, Copy)]
pub struct KmeansReport<'a> {
    fit: &'a KmeansFit,
    data: &'a Dataset,
}

impl<'a> KmeansReport<'a> {
    /// Report on `fit`, printing member rows from `data`.
    pub fn new(fit: &'a KmeansFit, data: &'a Dataset) -> Self {
        Self { fit, data }
    }
}

impl fmt::Display for KmeansReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Iterations: {}", self.fit.iterations)?;
        for (i, (stats, members)) in self.fit.stats.iter().zip(&self.fit.partition).enumerate() {
            writeln!(f, "Cluster {i}:")?;
            writeln!(f, "Center: {}", stats.center_string())?;
            writeln!(f, "Max Dist. to Center: {}", stats.max_distance)?;
            writeln!(f, "Min Dist. to Center: {}", stats.min_distance)?;
            writeln!(f, "Avg Dist. to Center: {}", stats.avg_distance)?;
            writeln!(f, "Sum Of Squared Errors: {}", stats.sse)?;
            writeln!(f, "{} Points:", members.len())?;
            for &m in members {
                if let Some(record) = self.data.records().get(m) {
                    writeln!(f, "{record}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render a k-means result as a plain-text report.
pub fn kmeans_report(fit: &KmeansFit, data: &Dataset) -> String {
    KmeansReport::new(fit, data).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{Agglomerative, FixedIndices, Kmeans};

    fn dataset() -> Dataset {
        Dataset::from_reader("1,0,1\n0,a,0\n0,b,1\n5,c,5\n5,d,6\n".as_bytes()).unwrap()
    }

    #[test]
    fn test_dendrogram_xml_layout() {
        let data = dataset();
        let tree = Agglomerative::new().fit(data.points()).unwrap();
        let xml = dendrogram_xml(&tree, tree.root().unwrap());
        let expected = "\
<tree height=\"7.810\">
   <node height=\"1.000\">
      <leaf height=\"0.000\" data=\"5, 6\"/>
      <leaf height=\"0.000\" data=\"5, 5\"/>
   </node>
   <node height=\"1.000\">
      <leaf height=\"0.000\" data=\"0, 1\"/>
      <leaf height=\"0.000\" data=\"0, 0\"/>
   </node>
</tree>
";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_leaf_subtree_xml() {
        let data = dataset();
        let tree = Agglomerative::new().fit(data.points()).unwrap();
        let xml = dendrogram_xml(&tree, 3);
        assert_eq!(
            xml,
            "<tree height=\"0.000\">\n   <leaf height=\"0.000\" data=\"5, 6\"/>\n</tree>\n"
        );
        assert_eq!(dendrogram_xml(&Dendrogram::default(), 0), "");
    }

    #[test]
    fn test_kmeans_report() {
        let data = dataset();
        let fit = Kmeans::new(2)
            .fit(data.points(), FixedIndices(vec![0, 2]))
            .unwrap();
        let report = kmeans_report(&fit, &data);
        assert!(report.starts_with("Iterations: 2\nCluster 0:\nCenter: 0,0.5\n"));
        assert!(report.contains("Sum Of Squared Errors: 0.5\n2 Points:\n0,a,0\n0,b,1\n"));
        assert!(report.contains("Cluster 1:\nCenter: 5,5.5\n"));
        assert!(report.contains("5,c,5\n5,d,6\n"));
    }
}
