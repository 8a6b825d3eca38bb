//! Static explanatory content shown under the model picker.

use crate::models::ModelSelection;

/// Pre-authored description of one model. `body_html` is trusted markup.
#[derive(Debug, Clone, Copy)]
pub struct ModelDescription {
    pub title: &'static str,
    pub body_html: &'static str,
    /// Path under the static mount.
    pub image: &'static str,
    pub caption: &'static str,
}

/// Shared glossary of the evaluation metrics quoted on the page.
pub const METRICS_HTML: &str = r#"<dl class="metric-list">
    <dt>Accuracy</dt><dd>Share of all predictions that were correct.</dd>
    <dt>Precision</dt><dd>Of the cases predicted positive (cancer), how many really were. High precision means fewer false alarms.</dd>
    <dt>Recall</dt><dd>Of the real positive cases, how many the model caught. High recall means fewer missed cases.</dd>
    <dt>F1 Score</dt><dd>Harmonic mean of precision and recall, balancing the two.</dd>
</dl>"#;

static RANDOM_FOREST: ModelDescription = ModelDescription {
    title: "Random Forest (Classifier)",
    body_html: r#"<p>An <strong>ensemble</strong> of decision trees, each trained on a random subset of the rows and features. Every tree is a weak learner; together they vote to make a strong, stable predictor. This is <strong>bagging</strong> (bootstrap aggregating).</p>
<h4>How it predicts</h4>
<ol>
    <li>Train many trees on bootstrapped samples.</li>
    <li>At each split only a random subset of features is considered, which decorrelates the trees.</li>
    <li>Each tree votes and the forest returns the <strong>majority class</strong>. Probabilities are the <strong>average</strong> of the per-tree probabilities.</li>
</ol>
<h4>Why it works</h4>
<p>Averaging over decorrelated trees <strong>reduces variance</strong> while keeping flexible, non-linear decision boundaries.</p>
<h4>Strengths</h4>
<ul>
    <li>Handles <strong>non-linear</strong> relations and <strong>feature interactions</strong>.</li>
    <li>Works well on <strong>tabular data</strong> with mixed scales and little preprocessing.</li>
    <li><strong>Robust</strong> to outliers and noisy features.</li>
    <li>Reports <strong>feature importance</strong>.</li>
</ul>"#,
    image: "/static/img/rf_diagram.png",
    caption: "Random Forest illustration",
};

static DECISION_TREE: ModelDescription = ModelDescription {
    title: "Decision Trees",
    body_html: r#"<p>A tree of nodes and branches that predicts by asking a sequence of if/else questions about the data. Each internal node is a condition, each branch an outcome, and each leaf a final class label.</p>
<h4>How it predicts</h4>
<ol>
    <li>Start at the root node.</li>
    <li>Ask a question about one feature (for example "is the radius above 15?").</li>
    <li>Follow the matching branch.</li>
    <li>Repeat until a leaf is reached.</li>
    <li>The leaf gives the predicted class (benign or malignant).</li>
</ol>
<h4>Why it works</h4>
<ul>
    <li>Splits partition the data into regions where one class dominates.</li>
    <li>Each split reduces uncertainty, measured by Gini impurity or entropy.</li>
    <li>The learned rules can be read directly as a sequence of decisions.</li>
</ul>
<h4>Strengths</h4>
<ul>
    <li>Easy to understand and visualise.</li>
    <li>Handles numeric and categorical features.</li>
    <li>No need to scale inputs.</li>
</ul>
<h4>Limitations</h4>
<ul>
    <li>Overfits unless pruned or depth-limited.</li>
    <li>Unstable: small changes in the data can produce a different tree.</li>
</ul>"#,
    image: "/static/img/decision_tree.webp",
    caption: "Decision Tree illustration",
};

static SVC: ModelDescription = ModelDescription {
    title: "Support Vector Classifier (SVC)",
    body_html: r#"<p>Finds the <strong>best separating boundary (hyperplane)</strong> between the classes. The <em>support vectors</em> are the training points closest to that boundary; they alone decide where it sits.</p>
<h4>How it predicts</h4>
<ol>
    <li>Fit the hyperplane that <strong>maximises the margin</strong> between classes.</li>
    <li>Only the support vectors (borderline cases) influence the boundary.</li>
    <li>New samples are classified by the side of the hyperplane they fall on. Probabilities can be estimated with Platt scaling.</li>
</ol>
<h4>Key settings</h4>
<ul>
    <li><code>kernel</code>: shape of the boundary. <code>linear</code> gives a flat plane, <code>rbf</code> handles non-linear patterns, <code>poly</code> and <code>sigmoid</code> are more specialised.</li>
    <li><code>C</code>: regularisation. Small values give a wider, more tolerant margin; large values fit the training data tightly and risk overfitting.</li>
    <li><code>gamma</code> (rbf/poly): reach of a single point. Low values give smooth boundaries, high values wrap closely around points.</li>
</ul>
<h4>Strengths</h4>
<ul>
    <li>Effective in <strong>high-dimensional spaces</strong>.</li>
    <li>Works well when classes are <strong>well separated</strong>.</li>
    <li>Models <strong>non-linear</strong> relationships through kernels.</li>
    <li>Often robust even with more features than samples.</li>
</ul>"#,
    image: "/static/img/svm.webp",
    caption: "Support Vector Machine illustration",
};

impl ModelSelection {
    pub fn description(&self) -> &'static ModelDescription {
        match self {
            ModelSelection::RandomForest => &RANDOM_FOREST,
            ModelSelection::DecisionTree => &DECISION_TREE,
            ModelSelection::Svc          => &SVC,
        }
    }
}
